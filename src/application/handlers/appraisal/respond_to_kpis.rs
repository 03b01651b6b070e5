//! RespondToKpisHandler - the employee accepts or rejects the submitted KPIs.

use std::sync::Arc;

use crate::domain::appraisal::Appraisal;
use crate::domain::foundation::{AppraisalId, CommandMetadata, DomainError};
use crate::ports::{AppliedChange, AppraisalRepository};

use super::apply_logged;

#[derive(Debug, Clone)]
pub struct RespondToKpisCommand {
    pub appraisal_id: AppraisalId,
    pub accepted: bool,
    pub rejection_reason: Option<String>,
}

pub struct RespondToKpisHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl RespondToKpisHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        cmd: RespondToKpisCommand,
        metadata: CommandMetadata,
    ) -> Result<AppliedChange, DomainError> {
        let actor = metadata.actor.clone();
        let RespondToKpisCommand {
            appraisal_id,
            accepted,
            rejection_reason,
        } = cmd;
        apply_logged(
            self.appraisals.as_ref(),
            &appraisal_id,
            &metadata,
            Box::new(move |appraisal: &mut Appraisal| {
                appraisal.respond_to_kpis(&actor, accepted, rejection_reason)
            }),
        )
        .await
    }
}
