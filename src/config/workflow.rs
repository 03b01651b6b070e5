//! Workflow rule configuration

use serde::Deserialize;

use crate::domain::appraisal::WorkflowPolicy;

/// Optional workflow rules
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowConfig {
    /// Require KPI weights to total 100 before submission
    #[serde(default)]
    pub require_full_weight: bool,
}

impl WorkflowConfig {
    pub fn policy(&self) -> WorkflowPolicy {
        WorkflowPolicy {
            require_full_weight: self.require_full_weight,
        }
    }
}
