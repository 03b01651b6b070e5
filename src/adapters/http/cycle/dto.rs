//! HTTP DTOs for cycle endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cycle::{AppraisalCycle, CycleDetails};

/// Body of `POST /api/cycles` and `PUT /api/cycles/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

impl From<CycleRequest> for CycleDetails {
    fn from(req: CycleRequest) -> Self {
        CycleDetails {
            name: req.name,
            start_date: req.start_date,
            end_date: req.end_date,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleResponse {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AppraisalCycle> for CycleResponse {
    fn from(cycle: &AppraisalCycle) -> Self {
        Self {
            id: cycle.id().to_string(),
            name: cycle.name().to_string(),
            start_date: cycle.start_date(),
            end_date: cycle.end_date(),
            is_active: cycle.is_active(),
            created_at: *cycle.created_at().as_datetime(),
            updated_at: *cycle.updated_at().as_datetime(),
        }
    }
}
