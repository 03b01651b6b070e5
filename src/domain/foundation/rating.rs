//! Rating value object (1.0 to 5.0 scale).
//!
//! Used for KPI scores from both reviewers and for the self and overall
//! appraisal ratings. Decimal values such as 3.5 are allowed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A performance rating between 1.0 and 5.0 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    /// Lowest allowed rating.
    pub const MIN: f64 = 1.0;

    /// Highest allowed rating.
    pub const MAX: f64 = 5.0;

    /// Creates a Rating, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        Self::for_field("rating", value)
    }

    /// Creates a Rating, reporting failures against the named field.
    pub fn for_field(field: &str, value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() {
            return Err(ValidationError::invalid_format(field, "rating must be a number"));
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(field, Self::MIN, Self::MAX, value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
