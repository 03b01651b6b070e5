//! SubmitEmployeeReviewHandler - the employee's self-assessment.
//!
//! KPI scores, the self review and the self rating commit together with the
//! status change, or not at all.

use std::sync::Arc;

use crate::domain::appraisal::{Appraisal, KpiScoreUpdate};
use crate::domain::foundation::{AppraisalId, CommandMetadata, DomainError};
use crate::ports::{AppliedChange, AppraisalRepository};

use super::apply_logged;

#[derive(Debug, Clone)]
pub struct SubmitEmployeeReviewCommand {
    pub appraisal_id: AppraisalId,
    pub self_review: Option<String>,
    pub self_rating: f64,
    pub kpi_updates: Vec<KpiScoreUpdate>,
}

pub struct SubmitEmployeeReviewHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl SubmitEmployeeReviewHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        cmd: SubmitEmployeeReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<AppliedChange, DomainError> {
        let actor = metadata.actor.clone();
        let SubmitEmployeeReviewCommand {
            appraisal_id,
            self_review,
            self_rating,
            kpi_updates,
        } = cmd;
        apply_logged(
            self.appraisals.as_ref(),
            &appraisal_id,
            &metadata,
            Box::new(move |appraisal: &mut Appraisal| {
                appraisal.submit_employee_review(&actor, self_review, self_rating, kpi_updates)
            }),
        )
        .await
    }
}
