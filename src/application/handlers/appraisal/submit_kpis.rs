//! SubmitKpisHandler - HR hands the KPI set to the employee.
//!
//! Transitions the appraisal from Draft to KpisSubmitted. Requires at least
//! one KPI and, under a strict policy, weights totalling 100.

use std::sync::Arc;

use crate::domain::appraisal::{Appraisal, WorkflowPolicy};
use crate::domain::foundation::{AppraisalId, CommandMetadata, DomainError};
use crate::ports::{AppliedChange, AppraisalRepository};

use super::apply_logged;

#[derive(Debug, Clone)]
pub struct SubmitKpisCommand {
    pub appraisal_id: AppraisalId,
}

pub struct SubmitKpisHandler {
    appraisals: Arc<dyn AppraisalRepository>,
    policy: WorkflowPolicy,
}

impl SubmitKpisHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>, policy: WorkflowPolicy) -> Self {
        Self { appraisals, policy }
    }

    pub async fn handle(
        &self,
        cmd: SubmitKpisCommand,
        metadata: CommandMetadata,
    ) -> Result<AppliedChange, DomainError> {
        let actor = metadata.actor.clone();
        let policy = self.policy;
        apply_logged(
            self.appraisals.as_ref(),
            &cmd.appraisal_id,
            &metadata,
            Box::new(move |appraisal: &mut Appraisal| appraisal.submit_kpis(&actor, &policy)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::{AppraisalStatus, ErrorCategory, ErrorCode};

    #[tokio::test]
    async fn submits_when_kpis_exist() {
        let fx = Fixture::new().await;
        let id = fx.create_appraisal("emp-1").await;
        fx.add_kpis(id, &[60.0, 40.0]).await;
        let handler = SubmitKpisHandler::new(fx.appraisals.clone(), WorkflowPolicy::default());

        let change = handler
            .handle(SubmitKpisCommand { appraisal_id: id }, as_hr())
            .await
            .unwrap();
        assert_eq!(change.appraisal.status(), AppraisalStatus::KpisSubmitted);
    }

    #[tokio::test]
    async fn zero_kpis_fail_precondition() {
        let fx = Fixture::new().await;
        let id = fx.create_appraisal("emp-1").await;
        let handler = SubmitKpisHandler::new(fx.appraisals.clone(), WorkflowPolicy::default());

        let err = handler
            .handle(SubmitKpisCommand { appraisal_id: id }, as_hr())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::PreconditionFailed);
    }

    #[tokio::test]
    async fn strict_policy_rejects_partial_weights() {
        let fx = Fixture::new().await;
        let id = fx.create_appraisal("emp-1").await;
        fx.add_kpis(id, &[60.0]).await;
        let handler = SubmitKpisHandler::new(fx.appraisals.clone(), WorkflowPolicy::strict());

        let err = handler
            .handle(SubmitKpisCommand { appraisal_id: id }, as_hr())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WeightTotalMismatch);
        let stored = fx.appraisals.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), AppraisalStatus::Draft);
    }
}
