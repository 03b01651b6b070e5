//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers
//! (read). [`AppraisalWorkflow`] bundles them behind one entry point.

pub mod handlers;
mod workflow;

pub use workflow::AppraisalWorkflow;
