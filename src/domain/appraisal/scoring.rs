//! Scoring aggregation over a KPI ledger.
//!
//! Completion is the share of KPIs that carry a score from one perspective.
//! The weighted score is informational only: the overall and self ratings
//! remain manual entries and are never derived from it.

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, Percentage, Rating};

use super::KpiLedger;

/// Whose scores are being aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Employee,
    Manager,
}

impl Perspective {
    fn label(&self) -> &'static str {
        match self {
            Perspective::Employee => "employee",
            Perspective::Manager => "manager",
        }
    }
}

/// Percentage of KPIs scored from `perspective`, rounded half up.
///
/// An empty ledger is 0% complete.
pub fn completion_percentage(ledger: &KpiLedger, perspective: Perspective) -> Percentage {
    Percentage::from_ratio(ledger.scored_count(perspective), ledger.len())
}

/// Denies a final review submission unless every KPI is scored.
pub fn gate_final_submission(ledger: &KpiLedger, perspective: Perspective) -> Result<(), DomainError> {
    let completion = completion_percentage(ledger, perspective);
    if completion.is_complete() {
        return Ok(());
    }
    Err(DomainError::new(
        ErrorCode::IncompleteScoring,
        format!(
            "All KPIs must be scored before the {} review can be submitted ({} complete)",
            perspective.label(),
            completion
        ),
    )
    .with_detail("perspective", perspective.label())
    .with_detail("completion", completion.value().to_string()))
}

/// Weight-normalised average of the scores from `perspective`.
///
/// Returns `None` until every KPI is scored from that perspective.
pub fn weighted_score(ledger: &KpiLedger, perspective: Perspective) -> Option<Rating> {
    if ledger.is_empty() {
        return None;
    }
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for kpi in ledger.iter() {
        let score = kpi.score_for(perspective)?;
        weighted_sum += kpi.weight().value() * score.value();
        total_weight += kpi.weight().value();
    }
    let average = (weighted_sum / total_weight * 100.0).round() / 100.0;
    Rating::try_new(average.clamp(Rating::MIN, Rating::MAX)).ok()
}

/// Snapshot of scoring progress for both reviewers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalProgress {
    pub kpi_count: usize,
    pub total_weight: f64,
    pub employee_completion: Percentage,
    pub manager_completion: Percentage,
    pub employee_weighted_score: Option<Rating>,
    pub manager_weighted_score: Option<Rating>,
}

impl AppraisalProgress {
    /// Computes progress for a ledger.
    pub fn of(ledger: &KpiLedger) -> Self {
        Self {
            kpi_count: ledger.len(),
            total_weight: ledger.total_weight(),
            employee_completion: completion_percentage(ledger, Perspective::Employee),
            manager_completion: completion_percentage(ledger, Perspective::Manager),
            employee_weighted_score: weighted_score(ledger, Perspective::Employee),
            manager_weighted_score: weighted_score(ledger, Perspective::Manager),
        }
    }
}
