//! HTTP DTOs for appraisal and KPI endpoints.
//!
//! All JSON is camelCase. Identifiers travel as strings and are parsed in
//! the handlers so a bad id is a 400, not a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::appraisal::{Appraisal, AppraisalProgress, Kpi, KpiDraft};
use crate::domain::foundation::AppraisalStatus;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/appraisals`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppraisalRequest {
    pub employee_id: String,
    #[serde(alias = "appraisalCycleId")]
    pub cycle_id: String,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Body of `POST /api/kpis`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKpiRequest {
    pub appraisal_id: String,
    #[serde(flatten)]
    pub definition: KpiDefinitionRequest,
}

/// Body of `PUT /api/kpis/{id}`, and the definition part of a create.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDefinitionRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    pub weight: f64,
}

impl From<KpiDefinitionRequest> for KpiDraft {
    fn from(req: KpiDefinitionRequest) -> Self {
        KpiDraft {
            title: req.title,
            description: req.description,
            target: req.target,
            weight: req.weight,
        }
    }
}

/// Body of `POST /api/appraisals/{id}/respond-kpis`.
///
/// `appraisalId` may be repeated in the body; it must then match the path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RespondToKpisRequest {
    #[serde(default)]
    pub appraisal_id: Option<String>,
    pub accepted: bool,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// A per-KPI score entry of either review.
pub trait KpiScoreEntry {
    /// Splits the entry into kpi id, score and comment.
    fn into_parts(self) -> (String, Option<f64>, Option<String>);
}

/// One KPI scored by the employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeeKpiScoreRequest {
    pub kpi_id: String,
    #[serde(default)]
    pub employee_score: Option<f64>,
    #[serde(default)]
    pub employee_comment: Option<String>,
}

impl KpiScoreEntry for EmployeeKpiScoreRequest {
    fn into_parts(self) -> (String, Option<f64>, Option<String>) {
        (self.kpi_id, self.employee_score, self.employee_comment)
    }
}

/// One KPI scored by the manager.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HodKpiScoreRequest {
    pub kpi_id: String,
    #[serde(default)]
    pub hod_score: Option<f64>,
    #[serde(default)]
    pub hod_comment: Option<String>,
}

impl KpiScoreEntry for HodKpiScoreRequest {
    fn into_parts(self) -> (String, Option<f64>, Option<String>) {
        (self.kpi_id, self.hod_score, self.hod_comment)
    }
}

/// Body of `POST /api/appraisals/{id}/employee-review`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeeReviewRequest {
    #[serde(default)]
    pub appraisal_id: Option<String>,
    #[serde(default)]
    pub employee_self_review: Option<String>,
    pub employee_self_rating: f64,
    #[serde(default)]
    pub kpi_updates: Vec<EmployeeKpiScoreRequest>,
}

/// Body of `POST /api/appraisals/{id}/hod-review`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HodReviewRequest {
    #[serde(default)]
    pub appraisal_id: Option<String>,
    pub overall_rating: f64,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub kpi_updates: Vec<HodKpiScoreRequest>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiResponse {
    pub id: String,
    pub appraisal_id: String,
    pub title: String,
    pub description: Option<String>,
    pub target: Option<String>,
    pub weight: f64,
    pub employee_score: Option<f64>,
    pub hod_score: Option<f64>,
    pub employee_comment: Option<String>,
    pub hod_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Kpi> for KpiResponse {
    fn from(kpi: &Kpi) -> Self {
        Self {
            id: kpi.id().to_string(),
            appraisal_id: kpi.appraisal_id().to_string(),
            title: kpi.title().to_string(),
            description: kpi.description().map(str::to_string),
            target: kpi.target().map(str::to_string),
            weight: kpi.weight().value(),
            employee_score: kpi.employee_score().map(|r| r.value()),
            hod_score: kpi.hod_score().map(|r| r.value()),
            employee_comment: kpi.employee_comment().map(str::to_string),
            hod_comment: kpi.hod_comment().map(str::to_string),
            created_at: *kpi.created_at().as_datetime(),
        }
    }
}

/// Numeric code, machine name and label of a status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub code: u8,
    pub name: String,
    pub label: String,
}

impl From<AppraisalStatus> for StatusResponse {
    fn from(status: AppraisalStatus) -> Self {
        Self {
            code: status.code(),
            name: status.as_str().to_string(),
            label: status.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalResponse {
    pub id: String,
    pub employee_id: String,
    pub cycle_id: String,
    pub status: StatusResponse,
    pub overall_rating: Option<f64>,
    pub comments: Option<String>,
    pub employee_self_review: Option<String>,
    pub employee_self_rating: Option<f64>,
    pub rejection_reason: Option<String>,
    pub kpis: Vec<KpiResponse>,
    pub progress: AppraisalProgress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Appraisal> for AppraisalResponse {
    fn from(appraisal: &Appraisal) -> Self {
        Self {
            id: appraisal.id().to_string(),
            employee_id: appraisal.employee_id().to_string(),
            cycle_id: appraisal.cycle_id().to_string(),
            status: appraisal.status().into(),
            overall_rating: appraisal.overall_rating().map(|r| r.value()),
            comments: appraisal.comments().map(str::to_string),
            employee_self_review: appraisal.employee_self_review().map(str::to_string),
            employee_self_rating: appraisal.employee_self_rating().map(|r| r.value()),
            rejection_reason: appraisal.rejection_reason().map(str::to_string),
            kpis: appraisal.kpis().iter().map(KpiResponse::from).collect(),
            progress: appraisal.progress(),
            created_at: *appraisal.created_at().as_datetime(),
            updated_at: *appraisal.updated_at().as_datetime(),
        }
    }
}

/// Response of a workflow transition: the updated appraisal plus the event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub event: String,
    pub appraisal: AppraisalResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CycleId, UserId};

    #[test]
    fn create_kpi_request_flattens_definition() {
        let json = r#"{"appraisalId":"a","title":"Delivery","weight":60}"#;
        let req: CreateKpiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.appraisal_id, "a");
        assert_eq!(req.definition.title, "Delivery");
        assert_eq!(req.definition.weight, 60.0);
        assert!(req.definition.description.is_none());
    }

    #[test]
    fn review_request_defaults_to_no_kpis() {
        let req: EmployeeReviewRequest =
            serde_json::from_str(r#"{"employeeSelfRating":4}"#).unwrap();
        assert!(req.kpi_updates.is_empty());
        assert_eq!(req.employee_self_rating, 4.0);
    }

    #[test]
    fn review_requests_read_perspective_scores() {
        let json = r#"{
            "appraisalId": "a",
            "employeeSelfReview": "Good year",
            "employeeSelfRating": 4,
            "kpiUpdates": [{"kpiId": "k", "employeeScore": 3.5, "employeeComment": "ok"}]
        }"#;
        let req: EmployeeReviewRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.appraisal_id.as_deref(), Some("a"));
        let parts = req.kpi_updates.into_iter().next().unwrap().into_parts();
        assert_eq!(parts, ("k".to_string(), Some(3.5), Some("ok".to_string())));

        let json = r#"{"overallRating": 3, "kpiUpdates": [{"kpiId": "k", "hodScore": 2}]}"#;
        let req: HodReviewRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.kpi_updates[0].hod_score, Some(2.0));
    }

    #[test]
    fn misnamed_review_fields_are_rejected() {
        let legacy = r#"{"employeeSelfRating":4,"kpis":[{"kpiId":"k","score":4}]}"#;
        assert!(serde_json::from_str::<EmployeeReviewRequest>(legacy).is_err());

        let wrong_perspective = r#"{"overallRating":3,"kpiUpdates":[{"kpiId":"k","employeeScore":4}]}"#;
        assert!(serde_json::from_str::<HodReviewRequest>(wrong_perspective).is_err());
    }

    #[test]
    fn appraisal_response_reports_status_triple() {
        let appraisal = Appraisal::new(UserId::new("emp-1").unwrap(), CycleId::new(), None);
        let json = serde_json::to_value(AppraisalResponse::from(&appraisal)).unwrap();

        assert_eq!(json["status"]["code"], 0);
        assert_eq!(json["status"]["name"], "draft");
        assert_eq!(json["employeeId"], "emp-1");
        assert_eq!(json["progress"]["kpiCount"], 0);
    }
}
