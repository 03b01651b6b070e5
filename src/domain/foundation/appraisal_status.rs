//! AppraisalStatus enum tracking the lifecycle of an appraisal.
//!
//! ```text
//! Draft -> KpisSubmitted -> KpisRespondedTo -> EmployeeReviewSubmitted -> HodReviewSubmitted
//!   ^            |
//!   +-- reject --+
//! ```
//!
//! `Completed` is a second terminal marker kept for compatibility with stored
//! records. Nothing transitions into it; it is treated exactly like
//! `HodReviewSubmitted`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of an appraisal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppraisalStatus {
    #[default]
    Draft,
    KpisSubmitted,
    KpisRespondedTo,
    EmployeeReviewSubmitted,
    HodReviewSubmitted,
    Completed,
}

impl AppraisalStatus {
    /// All statuses in progress order.
    pub const ALL: [AppraisalStatus; 6] = [
        AppraisalStatus::Draft,
        AppraisalStatus::KpisSubmitted,
        AppraisalStatus::KpisRespondedTo,
        AppraisalStatus::EmployeeReviewSubmitted,
        AppraisalStatus::HodReviewSubmitted,
        AppraisalStatus::Completed,
    ];

    /// Stable numeric code (0-5) used by existing clients.
    pub fn code(&self) -> u8 {
        match self {
            AppraisalStatus::Draft => 0,
            AppraisalStatus::KpisSubmitted => 1,
            AppraisalStatus::KpisRespondedTo => 2,
            AppraisalStatus::EmployeeReviewSubmitted => 3,
            AppraisalStatus::HodReviewSubmitted => 4,
            AppraisalStatus::Completed => 5,
        }
    }

    /// Looks a status up by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    /// Returns the storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppraisalStatus::Draft => "draft",
            AppraisalStatus::KpisSubmitted => "kpis_submitted",
            AppraisalStatus::KpisRespondedTo => "kpis_responded_to",
            AppraisalStatus::EmployeeReviewSubmitted => "employee_review_submitted",
            AppraisalStatus::HodReviewSubmitted => "hod_review_submitted",
            AppraisalStatus::Completed => "completed",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AppraisalStatus::Draft => "Draft",
            AppraisalStatus::KpisSubmitted => "KPIs Submitted",
            AppraisalStatus::KpisRespondedTo => "KPIs Reviewed",
            AppraisalStatus::EmployeeReviewSubmitted => "Self-Review Done",
            AppraisalStatus::HodReviewSubmitted => "Manager Reviewed",
            AppraisalStatus::Completed => "Completed",
        }
    }

    /// Returns true while KPIs may be added, revised or removed.
    pub fn kpis_editable(&self) -> bool {
        matches!(self, AppraisalStatus::Draft)
    }

    /// Returns true once the manager review has been recorded.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            AppraisalStatus::HodReviewSubmitted | AppraisalStatus::Completed
        )
    }

    /// Returns true if this status is at or past `milestone`.
    ///
    /// Both terminal values count as having reached every milestone.
    pub fn has_reached(&self, milestone: AppraisalStatus) -> bool {
        if self.is_finished() {
            return true;
        }
        self.code() >= milestone.code()
    }
}

impl StateMachine for AppraisalStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AppraisalStatus::*;
        matches!(
            (self, target),
            (Draft, KpisSubmitted)
                | (KpisSubmitted, KpisRespondedTo)
                | (KpisSubmitted, Draft)
                | (KpisRespondedTo, EmployeeReviewSubmitted)
                | (EmployeeReviewSubmitted, HodReviewSubmitted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AppraisalStatus::*;
        match self {
            Draft => vec![KpisSubmitted],
            KpisSubmitted => vec![KpisRespondedTo, Draft],
            KpisRespondedTo => vec![EmployeeReviewSubmitted],
            EmployeeReviewSubmitted => vec![HodReviewSubmitted],
            HodReviewSubmitted | Completed => vec![],
        }
    }
}

impl fmt::Display for AppraisalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AppraisalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown status '{}'", s))
            })
    }
}
