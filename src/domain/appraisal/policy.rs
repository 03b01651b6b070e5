//! Deployment-tunable workflow rules.

use crate::domain::foundation::{DomainError, ErrorCode};

use super::KpiLedger;

/// Allowed drift when comparing a weight total to 100.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// Optional business rules layered over the fixed state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowPolicy {
    /// When set, `submit_kpis` requires KPI weights to total 100.
    pub require_full_weight: bool,
}

impl WorkflowPolicy {
    pub fn strict() -> Self {
        Self {
            require_full_weight: true,
        }
    }

    /// Checks the ledger against the weight rule, if enabled.
    pub fn check_weights(&self, ledger: &KpiLedger) -> Result<(), DomainError> {
        if !self.require_full_weight {
            return Ok(());
        }
        let total = ledger.total_weight();
        if (total - 100.0).abs() > WEIGHT_TOLERANCE {
            return Err(DomainError::new(
                ErrorCode::WeightTotalMismatch,
                format!("KPI weights must total 100, got {}", total),
            )
            .with_detail("field", "weight")
            .with_detail("total", total.to_string()));
        }
        Ok(())
    }
}
