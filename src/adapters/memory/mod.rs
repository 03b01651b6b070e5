//! In-memory persistence adapters.
//!
//! The default storage when no database URL is configured, and the backing
//! store for handler and HTTP tests. State lives for the life of the process.

mod appraisal_repository;
mod cycle_repository;

pub use appraisal_repository::InMemoryAppraisalRepository;
pub use cycle_repository::InMemoryCycleRepository;
