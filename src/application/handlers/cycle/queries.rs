//! Read-side handlers for cycles.

use std::sync::Arc;

use crate::domain::cycle::AppraisalCycle;
use crate::domain::foundation::{CycleId, DomainError, ErrorCode};
use crate::ports::CycleRepository;

pub struct GetCycleHandler {
    cycles: Arc<dyn CycleRepository>,
}

impl GetCycleHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>) -> Self {
        Self { cycles }
    }

    pub async fn handle(&self, id: CycleId) -> Result<AppraisalCycle, DomainError> {
        self.cycles.find_by_id(&id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::CycleNotFound, format!("Cycle not found: {}", id))
        })
    }
}

pub struct ListCyclesHandler {
    cycles: Arc<dyn CycleRepository>,
}

impl ListCyclesHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>) -> Self {
        Self { cycles }
    }

    pub async fn handle(&self) -> Result<Vec<AppraisalCycle>, DomainError> {
        self.cycles.list().await
    }
}
