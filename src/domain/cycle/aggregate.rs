//! AppraisalCycle entity - a named, time-boxed review period.
//!
//! Appraisals reference a cycle but do not belong to it.

use chrono::NaiveDate;

use crate::domain::foundation::{CycleId, Timestamp, ValidationError};

/// A named period during which appraisals take place.
#[derive(Debug, Clone, PartialEq)]
pub struct AppraisalCycle {
    id: CycleId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Editable attributes of a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleDetails {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl CycleDetails {
    fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.end_date < self.start_date {
            return Err(ValidationError::invalid_format(
                "end_date",
                "end date must not precede start date",
            ));
        }
        Ok(Self { name, ..self })
    }
}

impl AppraisalCycle {
    /// Creates a new cycle after validating its details.
    pub fn new(details: CycleDetails) -> Result<Self, ValidationError> {
        let details = details.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id: CycleId::new(),
            name: details.name,
            start_date: details.start_date,
            end_date: details.end_date,
            is_active: details.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a cycle from persisted data.
    pub fn reconstitute(
        id: CycleId,
        details: CycleDetails,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: details.name,
            start_date: details.start_date,
            end_date: details.end_date,
            is_active: details.is_active,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable attributes.
    pub fn update(&mut self, details: CycleDetails) -> Result<(), ValidationError> {
        let details = details.validate()?;
        self.name = details.name;
        self.start_date = details.start_date;
        self.end_date = details.end_date;
        self.is_active = details.is_active;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns true if `date` falls within the cycle (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
