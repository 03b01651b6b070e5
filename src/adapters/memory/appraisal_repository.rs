//! In-memory implementation of AppraisalRepository.
//!
//! Each appraisal sits behind its own async mutex. `apply` holds that mutex
//! for the whole load, mutate, save sequence, which serializes writers per
//! appraisal without blocking readers of other appraisals.
//!
//! `delete` takes the same mutex and leaves `None` behind, so a writer that
//! fetched the slot before the delete finds it gone instead of updating a
//! detached copy. No code path holds the map lock while waiting on a slot.
//!
//! A repository built with [`InMemoryAppraisalRepository::linked`] also
//! registers every appraisal with the cycle store, so cycle references stay
//! valid under concurrent creates and cycle deletes. Lock order is slot, then
//! appraisal map, then cycle table.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::appraisal::{Appraisal, Kpi};
use crate::domain::foundation::{AppraisalId, CycleId, DomainError, ErrorCode, KpiId, UserId};
use crate::ports::{AppliedChange, AppraisalMutation, AppraisalRepository};

use super::InMemoryCycleRepository;

type Handle = Arc<Mutex<Option<Appraisal>>>;

struct Slot {
    employee_id: UserId,
    cycle_id: CycleId,
    appraisal: Handle,
}

/// In-memory appraisal store with per-appraisal locking.
#[derive(Default)]
pub struct InMemoryAppraisalRepository {
    slots: RwLock<HashMap<AppraisalId, Slot>>,
    cycles: Option<Arc<InMemoryCycleRepository>>,
}

impl InMemoryAppraisalRepository {
    /// A standalone store that does not check cycle references.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose appraisals must reference cycles in `cycles`.
    pub fn linked(cycles: Arc<InMemoryCycleRepository>) -> Self {
        Self {
            slots: RwLock::default(),
            cycles: Some(cycles),
        }
    }

    async fn handle(&self, id: &AppraisalId) -> Option<Handle> {
        self.slots
            .read()
            .await
            .get(id)
            .map(|slot| Arc::clone(&slot.appraisal))
    }

    async fn snapshot<F>(&self, filter: F) -> Vec<Appraisal>
    where
        F: Fn(&Slot) -> bool,
    {
        let handles: Vec<_> = self
            .slots
            .read()
            .await
            .values()
            .filter(|slot| filter(slot))
            .map(|slot| Arc::clone(&slot.appraisal))
            .collect();

        let mut appraisals = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Some(appraisal) = handle.lock().await.clone() {
                appraisals.push(appraisal);
            }
        }
        appraisals.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        appraisals
    }

    async fn apply_to(
        handle: Handle,
        id: &AppraisalId,
        mutation: AppraisalMutation,
    ) -> Result<AppliedChange, DomainError> {
        let mut guard = handle.lock().await;
        let stored = guard.as_mut().ok_or_else(|| not_found(id))?;

        let mut working = stored.clone();
        let event = mutation(&mut working)?;
        *stored = working.clone();

        Ok(AppliedChange {
            appraisal: working,
            event,
        })
    }
}

fn not_found(id: &AppraisalId) -> DomainError {
    DomainError::new(
        ErrorCode::AppraisalNotFound,
        format!("Appraisal not found: {}", id),
    )
}

#[async_trait]
impl AppraisalRepository for InMemoryAppraisalRepository {
    async fn save(&self, appraisal: &Appraisal) -> Result<(), DomainError> {
        let mut slots = self.slots.write().await;
        let duplicate = slots.values().any(|slot| {
            &slot.employee_id == appraisal.employee_id() && slot.cycle_id == appraisal.cycle_id()
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicateAppraisal,
                "Employee already has an appraisal in this cycle",
            ));
        }
        if let Some(cycles) = &self.cycles {
            cycles.reference(&appraisal.cycle_id()).await?;
        }
        slots.insert(
            appraisal.id(),
            Slot {
                employee_id: appraisal.employee_id().clone(),
                cycle_id: appraisal.cycle_id(),
                appraisal: Arc::new(Mutex::new(Some(appraisal.clone()))),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &AppraisalId) -> Result<Option<Appraisal>, DomainError> {
        match self.handle(id).await {
            Some(handle) => Ok(handle.lock().await.clone()),
            None => Ok(None),
        }
    }

    async fn find_by_employee_and_cycle(
        &self,
        employee_id: &UserId,
        cycle_id: &CycleId,
    ) -> Result<Option<Appraisal>, DomainError> {
        Ok(self
            .snapshot(|slot| &slot.employee_id == employee_id && &slot.cycle_id == cycle_id)
            .await
            .into_iter()
            .next())
    }

    async fn list(&self) -> Result<Vec<Appraisal>, DomainError> {
        Ok(self.snapshot(|_| true).await)
    }

    async fn list_by_employee(&self, employee_id: &UserId) -> Result<Vec<Appraisal>, DomainError> {
        Ok(self.snapshot(|slot| &slot.employee_id == employee_id).await)
    }

    async fn count_by_cycle(&self, cycle_id: &CycleId) -> Result<u64, DomainError> {
        let slots = self.slots.read().await;
        Ok(slots.values().filter(|s| &s.cycle_id == cycle_id).count() as u64)
    }

    async fn find_kpi(&self, kpi_id: &KpiId) -> Result<Option<Kpi>, DomainError> {
        Ok(self
            .snapshot(|_| true)
            .await
            .iter()
            .find_map(|a| a.kpis().get(*kpi_id).cloned()))
    }

    async fn apply(
        &self,
        id: &AppraisalId,
        mutation: AppraisalMutation,
    ) -> Result<AppliedChange, DomainError> {
        let handle = self.handle(id).await.ok_or_else(|| not_found(id))?;
        Self::apply_to(handle, id, mutation).await
    }

    async fn delete(&self, id: &AppraisalId) -> Result<(), DomainError> {
        let handle = self.handle(id).await.ok_or_else(|| not_found(id))?;
        let mut guard = handle.lock().await;
        let cycle_id = match guard.as_ref() {
            Some(appraisal) => appraisal.cycle_id(),
            None => return Err(not_found(id)),
        };
        self.slots.write().await.remove(id);
        *guard = None;
        if let Some(cycles) = &self.cycles {
            cycles.release(&cycle_id).await;
        }
        Ok(())
    }
}
