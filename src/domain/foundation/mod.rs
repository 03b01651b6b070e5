//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the appraisal domain.

mod appraisal_status;
mod auth;
mod command;
mod errors;
mod ids;
mod percentage;
mod rating;
mod role;
mod state_machine;
mod timestamp;
mod weight;

pub use appraisal_status::AppraisalStatus;
pub use auth::{Actor, AuthError};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCategory, ErrorCode, ValidationError};
pub use ids::{AppraisalId, CycleId, KpiId, UserId};
pub use percentage::Percentage;
pub use rating::Rating;
pub use role::Role;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use weight::Weight;
