//! Appraisal repository port.
//!
//! An appraisal and its KPIs are persisted as one unit. Every state change
//! goes through [`AppraisalRepository::apply`], which gives the caller a
//! single-writer scope for one appraisal.
//!
//! # Atomicity
//!
//! `apply` must:
//! - serialize concurrent calls for the same appraisal id
//! - run the mutation against a working copy
//! - persist the appraisal and all of its KPIs together, or nothing

use crate::domain::appraisal::{Appraisal, AppraisalEvent, Kpi};
use crate::domain::foundation::{AppraisalId, CycleId, DomainError, KpiId, UserId};
use async_trait::async_trait;

/// A mutation run inside the per-appraisal critical section.
pub type AppraisalMutation =
    Box<dyn FnOnce(&mut Appraisal) -> Result<AppraisalEvent, DomainError> + Send>;

/// The persisted result of a successful mutation.
#[derive(Debug, Clone)]
pub struct AppliedChange {
    pub appraisal: Appraisal,
    pub event: AppraisalEvent,
}

/// Repository port for the appraisal aggregate.
#[async_trait]
pub trait AppraisalRepository: Send + Sync {
    /// Save a new appraisal.
    ///
    /// # Errors
    ///
    /// - `DuplicateAppraisal` if the employee already has one in the cycle
    /// - `DatabaseError` on persistence failure
    async fn save(&self, appraisal: &Appraisal) -> Result<(), DomainError>;

    /// Find an appraisal with its KPIs.
    async fn find_by_id(&self, id: &AppraisalId) -> Result<Option<Appraisal>, DomainError>;

    /// Find the appraisal of an employee within a cycle.
    async fn find_by_employee_and_cycle(
        &self,
        employee_id: &UserId,
        cycle_id: &CycleId,
    ) -> Result<Option<Appraisal>, DomainError>;

    /// List every appraisal, newest first.
    async fn list(&self) -> Result<Vec<Appraisal>, DomainError>;

    /// List the appraisals of one employee, newest first.
    async fn list_by_employee(&self, employee_id: &UserId) -> Result<Vec<Appraisal>, DomainError>;

    /// Count appraisals referencing a cycle.
    async fn count_by_cycle(&self, cycle_id: &CycleId) -> Result<u64, DomainError>;

    /// Find a KPI by id, regardless of owning appraisal.
    async fn find_kpi(&self, kpi_id: &KpiId) -> Result<Option<Kpi>, DomainError>;

    /// Load, mutate and save one appraisal atomically.
    ///
    /// # Errors
    ///
    /// - `AppraisalNotFound` if the appraisal doesn't exist
    /// - whatever the mutation returns, in which case nothing is written
    /// - `DatabaseError` on persistence failure
    async fn apply(
        &self,
        id: &AppraisalId,
        mutation: AppraisalMutation,
    ) -> Result<AppliedChange, DomainError>;

    /// Delete an appraisal and its KPIs.
    ///
    /// # Errors
    ///
    /// - `AppraisalNotFound` if the appraisal doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &AppraisalId) -> Result<(), DomainError>;
}
