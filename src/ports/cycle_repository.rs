//! Cycle repository port.
//!
//! Defines the contract for persisting and retrieving appraisal cycles.
//! Cycles are referenced by appraisals but not owned by them, so deletion
//! is guarded by the application layer rather than cascading.

use crate::domain::cycle::AppraisalCycle;
use crate::domain::foundation::{CycleId, DomainError};
use async_trait::async_trait;

/// Repository port for appraisal cycles.
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Save a new cycle.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, cycle: &AppraisalCycle) -> Result<(), DomainError>;

    /// Update an existing cycle.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if cycle doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, cycle: &AppraisalCycle) -> Result<(), DomainError>;

    /// Find a cycle by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &CycleId) -> Result<Option<AppraisalCycle>, DomainError>;

    /// List all cycles, most recent start date first.
    async fn list(&self) -> Result<Vec<AppraisalCycle>, DomainError>;

    /// Delete a cycle.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if cycle doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &CycleId) -> Result<(), DomainError>;
}
