//! KPI weight value object (percentage share, 0 exclusive to 100 inclusive).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Relative importance of a KPI, expressed as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// Largest allowed weight.
    pub const MAX: f64 = 100.0;

    /// Creates a Weight, returning error unless `0 < value <= 100`.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() {
            return Err(ValidationError::invalid_format("weight", "weight must be a number"));
        }
        if value <= 0.0 || value > Self::MAX {
            return Err(ValidationError::out_of_range("weight", 0.0, Self::MAX, value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Weight {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
