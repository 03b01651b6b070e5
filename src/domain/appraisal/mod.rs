//! Appraisal module - the KPI ledger, the workflow state machine and scoring.
//!
//! # Module Organization
//!
//! - `aggregate` - the `Appraisal` aggregate root and its transitions
//! - `kpi` / `ledger` - KPI entities and the ordered set an appraisal owns
//! - `transition` - role, ownership and status gates
//! - `scoring` - completion percentage, submission gate, weighted score
//! - `policy` - optional rules such as the weight total check
//! - `events` - facts emitted by successful mutations

mod aggregate;
mod events;
mod kpi;
mod ledger;
mod policy;
mod scoring;
mod transition;

pub use aggregate::{Appraisal, AppraisalRecord};
pub use events::AppraisalEvent;
pub use kpi::{Kpi, KpiDraft, KpiScores};
pub use ledger::{KpiLedger, KpiScoreUpdate};
pub use policy::{WorkflowPolicy, WEIGHT_TOLERANCE};
pub use scoring::{
    completion_percentage, gate_final_submission, weighted_score, AppraisalProgress, Perspective,
};
pub use transition::{authorize_kpi_authoring, Transition};
