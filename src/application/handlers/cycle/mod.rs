//! Appraisal cycle command and query handlers.
//!
//! Only HR manages cycles. Any authenticated actor may read them.

mod create_cycle;
mod delete_cycle;
mod queries;
mod update_cycle;

pub use create_cycle::{CreateCycleCommand, CreateCycleHandler};
pub use delete_cycle::{DeleteCycleCommand, DeleteCycleHandler};
pub use queries::{GetCycleHandler, ListCyclesHandler};
pub use update_cycle::{UpdateCycleCommand, UpdateCycleHandler};
