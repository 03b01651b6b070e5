//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Coarse error classes callers branch on.
///
/// Each [`ErrorCode`] belongs to exactly one category. The HTTP adapter maps
/// categories to status codes; `Storage` is the only retryable one.
/// `Internal` marks a broken invariant inside the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    PreconditionFailed,
    IncompleteScoring,
    Forbidden,
    Unauthorized,
    Storage,
    Internal,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    WeightTotalMismatch,
    DuplicateAppraisal,

    // Not found errors
    AppraisalNotFound,
    KpiNotFound,
    CycleNotFound,

    // State errors
    InvalidStateTransition,
    NoKpisDefined,
    KpisLocked,
    CycleInUse,
    IncompleteScoring,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Returns the category this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        use ErrorCode::*;
        match self {
            ValidationFailed | EmptyField | OutOfRange | InvalidFormat | WeightTotalMismatch
            | DuplicateAppraisal => ErrorCategory::Validation,
            AppraisalNotFound | KpiNotFound | CycleNotFound => ErrorCategory::NotFound,
            InvalidStateTransition | NoKpisDefined | KpisLocked | CycleInUse => {
                ErrorCategory::PreconditionFailed
            }
            IncompleteScoring => ErrorCategory::IncompleteScoring,
            Unauthorized => ErrorCategory::Unauthorized,
            Forbidden => ErrorCategory::Forbidden,
            DatabaseError => ErrorCategory::Storage,
            InternalError => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::WeightTotalMismatch => "WEIGHT_TOTAL_MISMATCH",
            ErrorCode::DuplicateAppraisal => "DUPLICATE_APPRAISAL",
            ErrorCode::AppraisalNotFound => "APPRAISAL_NOT_FOUND",
            ErrorCode::KpiNotFound => "KPI_NOT_FOUND",
            ErrorCode::CycleNotFound => "CYCLE_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::NoKpisDefined => "NO_KPIS_DEFINED",
            ErrorCode::KpisLocked => "KPIS_LOCKED",
            ErrorCode::CycleInUse => "CYCLE_IN_USE",
            ErrorCode::IncompleteScoring => "INCOMPLETE_SCORING",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Creates a storage error wrapping an adapter failure.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the category of this error.
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Creates an error for a violated internal invariant.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Returns true if the failure is transient infrastructure trouble.
    pub fn is_storage(&self) -> bool {
        self.category() == ErrorCategory::Storage
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("title");
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("overall_rating", 1.0, 5.0, 6.5);
        assert_eq!(
            format!("{}", err),
            "Field 'overall_rating' must be between 1 and 5, got 6.5"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::AppraisalNotFound, "Appraisal not found");
        assert_eq!(format!("{}", err), "[APPRAISAL_NOT_FOUND] Appraisal not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "weight")
            .with_detail("reason", "out of range");

        assert_eq!(err.details.get("field"), Some(&"weight".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"out of range".to_string()));
    }

    #[test]
    fn validation_error_converts_with_field_detail() {
        let err: DomainError = ValidationError::empty_field("title").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.details.get("field"), Some(&"title".to_string()));
    }

    #[test]
    fn error_codes_map_to_categories() {
        assert_eq!(ErrorCode::KpisLocked.category(), ErrorCategory::PreconditionFailed);
        assert_eq!(ErrorCode::NoKpisDefined.category(), ErrorCategory::PreconditionFailed);
        assert_eq!(ErrorCode::IncompleteScoring.category(), ErrorCategory::IncompleteScoring);
        assert_eq!(ErrorCode::KpiNotFound.category(), ErrorCategory::NotFound);
        assert_eq!(ErrorCode::DuplicateAppraisal.category(), ErrorCategory::Validation);
        assert_eq!(ErrorCode::Forbidden.category(), ErrorCategory::Forbidden);
    }

    #[test]
    fn storage_errors_are_distinguishable() {
        assert!(DomainError::storage("connection reset").is_storage());
        assert!(!DomainError::forbidden("nope").is_storage());
    }

    #[test]
    fn internal_errors_are_not_storage() {
        let err = DomainError::internal("ledger out of sync");
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.is_storage());
    }
}
