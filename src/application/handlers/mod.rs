//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! command takes a [`CommandMetadata`](crate::domain::foundation::CommandMetadata)
//! carrying the resolved actor.

pub mod appraisal;
pub mod cycle;

#[cfg(test)]
pub(crate) mod test_support;

pub use appraisal::*;
pub use cycle::*;
