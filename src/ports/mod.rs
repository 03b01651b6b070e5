//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `AppraisalRepository` - Appraisals with their KPIs, mutated atomically
//! - `CycleRepository` - Appraisal cycles
//!
//! ## Identity Ports
//!
//! - `IdentityProvider` - Resolves a bearer token to an acting user and role

mod appraisal_repository;
mod cycle_repository;
mod identity_provider;

pub use appraisal_repository::{AppliedChange, AppraisalMutation, AppraisalRepository};
pub use cycle_repository::CycleRepository;
pub use identity_provider::IdentityProvider;
