//! DeleteAppraisalHandler - HR removes an appraisal together with its KPIs.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AppraisalId, CommandMetadata, DomainError, Role};
use crate::ports::AppraisalRepository;

#[derive(Debug, Clone)]
pub struct DeleteAppraisalCommand {
    pub appraisal_id: AppraisalId,
}

pub struct DeleteAppraisalHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl DeleteAppraisalHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        cmd: DeleteAppraisalCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        metadata.actor.require_role(Role::Hr, "delete appraisals")?;
        self.appraisals.delete(&cmd.appraisal_id).await?;

        info!(
            event = "appraisal.deleted",
            appraisal_id = %cmd.appraisal_id,
            actor = %metadata.actor.id,
            correlation_id = %metadata.correlation_id(),
            "Appraisal deleted"
        );
        Ok(())
    }
}
