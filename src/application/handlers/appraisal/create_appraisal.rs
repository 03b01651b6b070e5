//! CreateAppraisalHandler - HR opens an appraisal for one employee in one cycle.

use std::sync::Arc;

use tracing::info;

use crate::domain::appraisal::Appraisal;
use crate::domain::foundation::{CommandMetadata, CycleId, DomainError, ErrorCode, Role, UserId};
use crate::ports::{AppraisalRepository, CycleRepository};

/// Command to create an appraisal in `Draft`.
#[derive(Debug, Clone)]
pub struct CreateAppraisalCommand {
    pub employee_id: UserId,
    pub cycle_id: CycleId,
    pub comments: Option<String>,
}

/// Handler for creating appraisals.
pub struct CreateAppraisalHandler {
    appraisals: Arc<dyn AppraisalRepository>,
    cycles: Arc<dyn CycleRepository>,
}

impl CreateAppraisalHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>, cycles: Arc<dyn CycleRepository>) -> Self {
        Self { appraisals, cycles }
    }

    pub async fn handle(
        &self,
        cmd: CreateAppraisalCommand,
        metadata: CommandMetadata,
    ) -> Result<Appraisal, DomainError> {
        metadata.actor.require_role(Role::Hr, "create appraisals")?;

        // 1. The cycle must exist
        if self.cycles.find_by_id(&cmd.cycle_id).await?.is_none() {
            return Err(DomainError::new(
                ErrorCode::CycleNotFound,
                format!("Cycle not found: {}", cmd.cycle_id),
            ));
        }

        // 2. One appraisal per employee per cycle
        if self
            .appraisals
            .find_by_employee_and_cycle(&cmd.employee_id, &cmd.cycle_id)
            .await?
            .is_some()
        {
            return Err(duplicate(&cmd));
        }

        // 3. Persist (the store re-checks uniqueness)
        let appraisal = Appraisal::new(cmd.employee_id, cmd.cycle_id, cmd.comments);
        self.appraisals.save(&appraisal).await?;

        info!(
            event = "appraisal.created",
            appraisal_id = %appraisal.id(),
            employee_id = %appraisal.employee_id(),
            cycle_id = %appraisal.cycle_id(),
            actor = %metadata.actor.id,
            correlation_id = %metadata.correlation_id(),
            "Appraisal created"
        );
        Ok(appraisal)
    }
}

fn duplicate(cmd: &CreateAppraisalCommand) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateAppraisal,
        "Employee already has an appraisal in this cycle",
    )
    .with_detail("employee_id", cmd.employee_id.to_string())
    .with_detail("cycle_id", cmd.cycle_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::AppraisalStatus;

    #[tokio::test]
    async fn hr_creates_draft_appraisal() {
        let fx = Fixture::new().await;
        let handler = CreateAppraisalHandler::new(fx.appraisals.clone(), fx.cycles.clone());

        let appraisal = handler
            .handle(
                CreateAppraisalCommand {
                    employee_id: user("emp-1"),
                    cycle_id: fx.cycle_id,
                    comments: Some("first review".into()),
                },
                as_hr(),
            )
            .await
            .unwrap();

        assert_eq!(appraisal.status(), AppraisalStatus::Draft);
        assert_eq!(appraisal.comments(), Some("first review"));
        assert!(fx.appraisals.find_by_id(&appraisal.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_cycle_is_not_found() {
        let fx = Fixture::new().await;
        let handler = CreateAppraisalHandler::new(fx.appraisals.clone(), fx.cycles.clone());

        let err = handler
            .handle(
                CreateAppraisalCommand {
                    employee_id: user("emp-1"),
                    cycle_id: CycleId::new(),
                    comments: None,
                },
                as_hr(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CycleNotFound);
    }

    #[tokio::test]
    async fn second_appraisal_in_cycle_is_duplicate() {
        let fx = Fixture::new().await;
        fx.create_appraisal("emp-1").await;
        let handler = CreateAppraisalHandler::new(fx.appraisals.clone(), fx.cycles.clone());

        let err = handler
            .handle(
                CreateAppraisalCommand {
                    employee_id: user("emp-1"),
                    cycle_id: fx.cycle_id,
                    comments: None,
                },
                as_hr(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateAppraisal);
    }

    #[tokio::test]
    async fn non_hr_cannot_create() {
        let fx = Fixture::new().await;
        let handler = CreateAppraisalHandler::new(fx.appraisals.clone(), fx.cycles.clone());

        let err = handler
            .handle(
                CreateAppraisalCommand {
                    employee_id: user("emp-1"),
                    cycle_id: fx.cycle_id,
                    comments: None,
                },
                as_manager(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
