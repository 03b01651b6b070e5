//! CreateCycleHandler - HR opens a new appraisal cycle.

use std::sync::Arc;

use tracing::info;

use crate::domain::cycle::{AppraisalCycle, CycleDetails};
use crate::domain::foundation::{CommandMetadata, DomainError, Role};
use crate::ports::CycleRepository;

/// Command to create a new cycle.
#[derive(Debug, Clone)]
pub struct CreateCycleCommand {
    pub details: CycleDetails,
}

/// Handler for cycle creation.
pub struct CreateCycleHandler {
    cycles: Arc<dyn CycleRepository>,
}

impl CreateCycleHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>) -> Self {
        Self { cycles }
    }

    pub async fn handle(
        &self,
        cmd: CreateCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<AppraisalCycle, DomainError> {
        metadata.actor.require_role(Role::Hr, "create cycles")?;

        let cycle = AppraisalCycle::new(cmd.details)?;
        self.cycles.save(&cycle).await?;

        info!(
            event = "cycle.created",
            cycle_id = %cycle.id(),
            name = cycle.name(),
            actor = %metadata.actor.id,
            correlation_id = %metadata.correlation_id(),
            "Cycle created"
        );
        Ok(cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ErrorCode;
    use chrono::NaiveDate;

    fn details(name: &str) -> CycleDetails {
        CycleDetails {
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            is_active: false,
        }
    }

    #[tokio::test]
    async fn hr_creates_cycle() {
        let fx = Fixture::new().await;
        let handler = CreateCycleHandler::new(fx.cycles.clone());

        let cycle = handler
            .handle(CreateCycleCommand { details: details("H1 2026") }, as_hr())
            .await
            .unwrap();
        assert_eq!(fx.cycles.find_by_id(&cycle.id()).await.unwrap(), Some(cycle));
    }

    #[tokio::test]
    async fn empty_name_is_validation_error() {
        let fx = Fixture::new().await;
        let handler = CreateCycleHandler::new(fx.cycles.clone());

        let err = handler
            .handle(CreateCycleCommand { details: details(" ") }, as_hr())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[tokio::test]
    async fn manager_cannot_create_cycle() {
        let fx = Fixture::new().await;
        let handler = CreateCycleHandler::new(fx.cycles.clone());

        let err = handler
            .handle(CreateCycleCommand { details: details("H1") }, as_manager())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
