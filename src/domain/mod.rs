//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `cycle` - Appraisal cycles that appraisals reference
//! - `appraisal` - The appraisal aggregate, KPI ledger and scoring rules

pub mod appraisal;
pub mod cycle;
pub mod foundation;
