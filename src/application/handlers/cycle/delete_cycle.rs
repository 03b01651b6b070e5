//! DeleteCycleHandler - HR removes a cycle no appraisal references.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{CommandMetadata, CycleId, DomainError, ErrorCode, Role};
use crate::ports::{AppraisalRepository, CycleRepository};

#[derive(Debug, Clone)]
pub struct DeleteCycleCommand {
    pub cycle_id: CycleId,
}

pub struct DeleteCycleHandler {
    cycles: Arc<dyn CycleRepository>,
    appraisals: Arc<dyn AppraisalRepository>,
}

impl DeleteCycleHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>, appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { cycles, appraisals }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        metadata.actor.require_role(Role::Hr, "delete cycles")?;

        let in_use = self.appraisals.count_by_cycle(&cmd.cycle_id).await?;
        if in_use > 0 {
            warn!(cycle_id = %cmd.cycle_id, appraisals = in_use, "Refusing to delete cycle in use");
            return Err(DomainError::new(
                ErrorCode::CycleInUse,
                format!("Cycle is referenced by {} appraisal(s)", in_use),
            )
            .with_detail("appraisals", in_use.to_string()));
        }

        self.cycles.delete(&cmd.cycle_id).await?;
        info!(
            event = "cycle.deleted",
            cycle_id = %cmd.cycle_id,
            actor = %metadata.actor.id,
            correlation_id = %metadata.correlation_id(),
            "Cycle deleted"
        );
        Ok(())
    }
}
