//! In-memory implementation of CycleRepository.
//!
//! The table also counts the appraisals that point at each cycle, filled in
//! by a linked [`InMemoryAppraisalRepository`]. A referenced cycle cannot be
//! deleted and an appraisal cannot reference a missing cycle, the same
//! guarantee the foreign key gives in PostgreSQL.
//!
//! [`InMemoryAppraisalRepository`]: super::InMemoryAppraisalRepository

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::cycle::AppraisalCycle;
use crate::domain::foundation::{CycleId, DomainError, ErrorCode};
use crate::ports::CycleRepository;

#[derive(Default)]
struct CycleTable {
    cycles: HashMap<CycleId, AppraisalCycle>,
    references: HashMap<CycleId, usize>,
}

/// In-memory cycle store.
#[derive(Default)]
pub struct InMemoryCycleRepository {
    table: RwLock<CycleTable>,
}

impl InMemoryCycleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more appraisal pointing at the cycle.
    pub(super) async fn reference(&self, id: &CycleId) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        if !table.cycles.contains_key(id) {
            return Err(not_found(id));
        }
        *table.references.entry(*id).or_insert(0) += 1;
        Ok(())
    }

    /// Drops one appraisal reference to the cycle.
    pub(super) async fn release(&self, id: &CycleId) {
        let mut table = self.table.write().await;
        if let Some(count) = table.references.get_mut(id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                table.references.remove(id);
            }
        }
    }
}

fn not_found(id: &CycleId) -> DomainError {
    DomainError::new(ErrorCode::CycleNotFound, format!("Cycle not found: {}", id))
}

#[async_trait]
impl CycleRepository for InMemoryCycleRepository {
    async fn save(&self, cycle: &AppraisalCycle) -> Result<(), DomainError> {
        self.table.write().await.cycles.insert(cycle.id(), cycle.clone());
        Ok(())
    }

    async fn update(&self, cycle: &AppraisalCycle) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        match table.cycles.get_mut(&cycle.id()) {
            Some(existing) => {
                *existing = cycle.clone();
                Ok(())
            }
            None => Err(not_found(&cycle.id())),
        }
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<AppraisalCycle>, DomainError> {
        Ok(self.table.read().await.cycles.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<AppraisalCycle>, DomainError> {
        let mut cycles: Vec<_> = self.table.read().await.cycles.values().cloned().collect();
        cycles.sort_by(|a, b| {
            b.start_date()
                .cmp(&a.start_date())
                .then_with(|| b.created_at().cmp(&a.created_at()))
        });
        Ok(cycles)
    }

    async fn delete(&self, id: &CycleId) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        if table.references.get(id).copied().unwrap_or(0) > 0 {
            return Err(DomainError::new(
                ErrorCode::CycleInUse,
                "Cycle is referenced by existing appraisals",
            ));
        }
        table.cycles.remove(id).map(|_| ()).ok_or_else(|| not_found(id))
    }
}
