//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCycleRepository` - appraisal cycles
//! - `PostgresAppraisalRepository` - appraisals with their KPIs

mod appraisal_repository;
mod cycle_repository;

pub use appraisal_repository::PostgresAppraisalRepository;
pub use cycle_repository::PostgresCycleRepository;

use crate::domain::foundation::DomainError;

/// Maps a sqlx error to a `DatabaseError` naming the failed action.
pub(crate) fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(action, error = %e, "database operation failed");
        DomainError::storage(format!("Failed to {}: {}", action, e))
    }
}
