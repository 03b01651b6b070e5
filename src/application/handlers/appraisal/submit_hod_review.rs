//! SubmitHodReviewHandler - the manager's final review.
//!
//! Completes the appraisal: KPI scores, comments and the overall rating
//! commit together with the move to HodReviewSubmitted.

use std::sync::Arc;

use crate::domain::appraisal::{Appraisal, KpiScoreUpdate};
use crate::domain::foundation::{AppraisalId, CommandMetadata, DomainError};
use crate::ports::{AppliedChange, AppraisalRepository};

use super::apply_logged;

#[derive(Debug, Clone)]
pub struct SubmitHodReviewCommand {
    pub appraisal_id: AppraisalId,
    pub overall_rating: f64,
    pub comments: Option<String>,
    pub kpi_updates: Vec<KpiScoreUpdate>,
}

pub struct SubmitHodReviewHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl SubmitHodReviewHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        cmd: SubmitHodReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<AppliedChange, DomainError> {
        let actor = metadata.actor.clone();
        let SubmitHodReviewCommand {
            appraisal_id,
            overall_rating,
            comments,
            kpi_updates,
        } = cmd;
        apply_logged(
            self.appraisals.as_ref(),
            &appraisal_id,
            &metadata,
            Box::new(move |appraisal: &mut Appraisal| {
                appraisal.submit_hod_review(&actor, overall_rating, comments, kpi_updates)
            }),
        )
        .await
    }
}
