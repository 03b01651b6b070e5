//! Role enum identifying which party of the appraisal an actor represents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The three parties of an appraisal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Human resources: owns cycles, appraisals and KPI drafting.
    Hr,
    /// The appraised employee.
    Employee,
    /// Head of department performing the final review.
    Manager,
}

impl Role {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "hr",
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Hr => "HR",
            Role::Employee => "Employee",
            Role::Manager => "Manager",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hr" => Ok(Role::Hr),
            "employee" => Ok(Role::Employee),
            // "hod" is the head-of-department alias used on review payloads
            "manager" | "hod" => Ok(Role::Manager),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("HR".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!("Employee".parse::<Role>().unwrap(), Role::Employee);
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("hod".parse::<Role>().unwrap(), Role::Manager);
    }

    #[test]
    fn rejects_unknown_role() {
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"hr\"");
        assert_eq!(Role::Manager.as_str(), "manager");
    }
}
