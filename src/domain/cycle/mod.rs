//! Appraisal cycle module.

mod aggregate;

pub use aggregate::{AppraisalCycle, CycleDetails};
