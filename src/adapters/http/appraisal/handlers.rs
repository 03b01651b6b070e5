//! HTTP handlers for appraisal and KPI endpoints.
//!
//! These handlers parse ids, hand commands to the [`AppraisalWorkflow`] with
//! the caller's metadata and shape the result. No rule is checked here.
//!
//! [`AppraisalWorkflow`]: crate::application::AppraisalWorkflow

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    AddKpiCommand, CreateAppraisalCommand, DeleteAppraisalCommand, RemoveKpiCommand,
    RespondToKpisCommand, ReviseKpiCommand, SubmitEmployeeReviewCommand, SubmitHodReviewCommand,
    SubmitKpisCommand,
};
use crate::domain::appraisal::{AppraisalProgress, KpiScoreUpdate};
use crate::domain::foundation::{AppraisalId, KpiId, UserId};
use crate::ports::AppliedChange;

use super::super::error::ApiError;
use super::super::middleware::Caller;
use super::super::AppState;
use super::dto::{
    AppraisalResponse, CreateAppraisalRequest, CreateKpiRequest, EmployeeReviewRequest,
    HodReviewRequest, KpiDefinitionRequest, KpiResponse, KpiScoreEntry, RespondToKpisRequest,
    TransitionResponse,
};

fn parse_id<T: FromStr>(field: &str, raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid(field, format!("Invalid {}: {}", field, raw)))
}

fn parse_user(field: &str, raw: String) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|e| ApiError::invalid(field, e.to_string()))
}

fn score_updates<E: KpiScoreEntry>(entries: Vec<E>) -> Result<Vec<KpiScoreUpdate>, ApiError> {
    entries
        .into_iter()
        .map(|entry| {
            let (kpi_id, score, comment) = entry.into_parts();
            Ok(KpiScoreUpdate {
                kpi_id: parse_id::<KpiId>("kpiId", &kpi_id)?,
                score,
                comment,
            })
        })
        .collect()
}

/// A body that repeats the appraisal id must name the one in the path.
fn check_body_id(path_id: AppraisalId, body_id: Option<&str>) -> Result<(), ApiError> {
    let Some(raw) = body_id else {
        return Ok(());
    };
    if parse_id::<AppraisalId>("appraisalId", raw)? != path_id {
        return Err(ApiError::invalid(
            "appraisalId",
            "Body appraisalId does not match the path",
        ));
    }
    Ok(())
}

fn transition(change: AppliedChange) -> Json<TransitionResponse> {
    Json(TransitionResponse {
        event: change.event.name().to_string(),
        appraisal: AppraisalResponse::from(&change.appraisal),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Appraisals
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/appraisals
pub async fn list_appraisals(
    State(state): State<AppState>,
    Caller(metadata): Caller,
) -> Result<Json<Vec<AppraisalResponse>>, ApiError> {
    let appraisals = state.workflow.list_appraisals(metadata).await?;
    Ok(Json(appraisals.iter().map(AppraisalResponse::from).collect()))
}

/// GET /api/appraisals/employee/:employee_id
pub async fn list_employee_appraisals(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(employee_id): Path<String>,
) -> Result<Json<Vec<AppraisalResponse>>, ApiError> {
    let employee_id = parse_user("employeeId", employee_id)?;
    let appraisals = state
        .workflow
        .list_employee_appraisals(employee_id, metadata)
        .await?;
    Ok(Json(appraisals.iter().map(AppraisalResponse::from).collect()))
}

/// GET /api/appraisals/:id
pub async fn get_appraisal(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
) -> Result<Json<AppraisalResponse>, ApiError> {
    let id: AppraisalId = parse_id("id", &id)?;
    let appraisal = state.workflow.get_appraisal(id, metadata).await?;
    Ok(Json(AppraisalResponse::from(&appraisal)))
}

/// GET /api/appraisals/:id/progress
pub async fn get_progress(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
) -> Result<Json<AppraisalProgress>, ApiError> {
    let id: AppraisalId = parse_id("id", &id)?;
    Ok(Json(state.workflow.progress(id, metadata).await?))
}

/// POST /api/appraisals
pub async fn create_appraisal(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    payload: Result<Json<CreateAppraisalRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = CreateAppraisalCommand {
        employee_id: parse_user("employeeId", request.employee_id)?,
        cycle_id: parse_id("cycleId", &request.cycle_id)?,
        comments: request.comments,
    };
    let appraisal = state.workflow.create_appraisal(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(AppraisalResponse::from(&appraisal))))
}

/// DELETE /api/appraisals/:id
pub async fn delete_appraisal(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let appraisal_id = parse_id("id", &id)?;
    state
        .workflow
        .delete_appraisal(DeleteAppraisalCommand { appraisal_id }, metadata)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Workflow transitions
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/appraisals/:id/submit-kpis
pub async fn submit_kpis(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let appraisal_id = parse_id("id", &id)?;
    let change = state
        .workflow
        .submit_kpis(SubmitKpisCommand { appraisal_id }, metadata)
        .await?;
    Ok(transition(change))
}

/// POST /api/appraisals/:id/respond-kpis
pub async fn respond_to_kpis(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
    payload: Result<Json<RespondToKpisRequest>, JsonRejection>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let appraisal_id = parse_id("id", &id)?;
    let Json(request) = payload?;
    check_body_id(appraisal_id, request.appraisal_id.as_deref())?;
    let cmd = RespondToKpisCommand {
        appraisal_id,
        accepted: request.accepted,
        rejection_reason: request.rejection_reason,
    };
    Ok(transition(state.workflow.respond_to_kpis(cmd, metadata).await?))
}

/// POST /api/appraisals/:id/employee-review
pub async fn submit_employee_review(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeReviewRequest>, JsonRejection>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let appraisal_id = parse_id("id", &id)?;
    let Json(request) = payload?;
    check_body_id(appraisal_id, request.appraisal_id.as_deref())?;
    let cmd = SubmitEmployeeReviewCommand {
        appraisal_id,
        self_review: request.employee_self_review,
        self_rating: request.employee_self_rating,
        kpi_updates: score_updates(request.kpi_updates)?,
    };
    Ok(transition(
        state.workflow.submit_employee_review(cmd, metadata).await?,
    ))
}

/// POST /api/appraisals/:id/hod-review
pub async fn submit_hod_review(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
    payload: Result<Json<HodReviewRequest>, JsonRejection>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let appraisal_id = parse_id("id", &id)?;
    let Json(request) = payload?;
    check_body_id(appraisal_id, request.appraisal_id.as_deref())?;
    let cmd = SubmitHodReviewCommand {
        appraisal_id,
        overall_rating: request.overall_rating,
        comments: request.comments,
        kpi_updates: score_updates(request.kpi_updates)?,
    };
    Ok(transition(state.workflow.submit_hod_review(cmd, metadata).await?))
}

// ════════════════════════════════════════════════════════════════════════════════
// KPIs
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/kpis/appraisal/:appraisal_id
pub async fn list_kpis(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(appraisal_id): Path<String>,
) -> Result<Json<Vec<KpiResponse>>, ApiError> {
    let appraisal_id: AppraisalId = parse_id("appraisalId", &appraisal_id)?;
    let kpis = state.workflow.list_kpis(appraisal_id, metadata).await?;
    Ok(Json(kpis.iter().map(KpiResponse::from).collect()))
}

/// POST /api/kpis
pub async fn create_kpi(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    payload: Result<Json<CreateKpiRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = AddKpiCommand {
        appraisal_id: parse_id("appraisalId", &request.appraisal_id)?,
        draft: request.definition.into(),
    };
    let result = state.workflow.add_kpi(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(KpiResponse::from(&result.kpi))))
}

/// PUT /api/kpis/:id
pub async fn update_kpi(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
    payload: Result<Json<KpiDefinitionRequest>, JsonRejection>,
) -> Result<Json<KpiResponse>, ApiError> {
    let kpi_id = parse_id("id", &id)?;
    let Json(request) = payload?;
    let kpi = state
        .workflow
        .revise_kpi(
            ReviseKpiCommand {
                kpi_id,
                draft: request.into(),
            },
            metadata,
        )
        .await?;
    Ok(Json(KpiResponse::from(&kpi)))
}

/// DELETE /api/kpis/:id
pub async fn delete_kpi(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let kpi_id = parse_id("id", &id)?;
    state
        .workflow
        .remove_kpi(RemoveKpiCommand { kpi_id }, metadata)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::appraisal::dto::{EmployeeKpiScoreRequest, HodKpiScoreRequest};

    #[test]
    fn bad_ids_are_bad_requests() {
        let err = parse_id::<AppraisalId>("id", "not-a-uuid").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn score_updates_parse_kpi_ids() {
        let kpi_id = KpiId::new();
        let updates = score_updates(vec![HodKpiScoreRequest {
            kpi_id: kpi_id.to_string(),
            hod_score: Some(4.0),
            hod_comment: Some("agreed".into()),
        }])
        .unwrap();
        assert_eq!(updates[0].kpi_id, kpi_id);
        assert_eq!(updates[0].score, Some(4.0));
        assert_eq!(updates[0].comment.as_deref(), Some("agreed"));

        let bad = score_updates(vec![EmployeeKpiScoreRequest {
            kpi_id: "x".into(),
            employee_score: None,
            employee_comment: None,
        }]);
        assert!(bad.is_err());
    }

    #[test]
    fn body_appraisal_id_must_match_path() {
        let id = AppraisalId::new();
        assert!(check_body_id(id, None).is_ok());
        assert!(check_body_id(id, Some(&id.to_string())).is_ok());

        let other = AppraisalId::new().to_string();
        let err = check_body_id(id, Some(&other)).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(check_body_id(id, Some("nope")).is_err());
    }
}
