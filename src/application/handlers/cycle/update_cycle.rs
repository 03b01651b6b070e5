//! UpdateCycleHandler - HR edits a cycle's name, dates or active flag.

use std::sync::Arc;

use tracing::info;

use crate::domain::cycle::{AppraisalCycle, CycleDetails};
use crate::domain::foundation::{CommandMetadata, CycleId, DomainError, ErrorCode, Role};
use crate::ports::CycleRepository;

#[derive(Debug, Clone)]
pub struct UpdateCycleCommand {
    pub cycle_id: CycleId,
    pub details: CycleDetails,
}

pub struct UpdateCycleHandler {
    cycles: Arc<dyn CycleRepository>,
}

impl UpdateCycleHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>) -> Self {
        Self { cycles }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<AppraisalCycle, DomainError> {
        metadata.actor.require_role(Role::Hr, "update cycles")?;

        let mut cycle = self.cycles.find_by_id(&cmd.cycle_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::CycleNotFound,
                format!("Cycle not found: {}", cmd.cycle_id),
            )
        })?;
        cycle.update(cmd.details)?;
        self.cycles.update(&cycle).await?;

        info!(
            event = "cycle.updated",
            cycle_id = %cycle.id(),
            actor = %metadata.actor.id,
            correlation_id = %metadata.correlation_id(),
            "Cycle updated"
        );
        Ok(cycle)
    }
}
