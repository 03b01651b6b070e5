//! HTTP handlers for cycle endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{CreateCycleCommand, DeleteCycleCommand, UpdateCycleCommand};
use crate::domain::foundation::CycleId;

use super::super::error::ApiError;
use super::super::middleware::Caller;
use super::super::AppState;
use super::dto::{CycleRequest, CycleResponse};

fn parse_cycle_id(raw: &str) -> Result<CycleId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid("id", format!("Invalid cycle id: {}", raw)))
}

/// GET /api/cycles
pub async fn list_cycles(
    State(state): State<AppState>,
    _caller: Caller,
) -> Result<Json<Vec<CycleResponse>>, ApiError> {
    let cycles = state.workflow.list_cycles().await?;
    Ok(Json(cycles.iter().map(CycleResponse::from).collect()))
}

/// GET /api/cycles/:id
pub async fn get_cycle(
    State(state): State<AppState>,
    _caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<CycleResponse>, ApiError> {
    let cycle = state.workflow.get_cycle(parse_cycle_id(&id)?).await?;
    Ok(Json(CycleResponse::from(&cycle)))
}

/// POST /api/cycles
pub async fn create_cycle(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    payload: Result<Json<CycleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cycle = state
        .workflow
        .create_cycle(
            CreateCycleCommand {
                details: request.into(),
            },
            metadata,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(CycleResponse::from(&cycle))))
}

/// PUT /api/cycles/:id
pub async fn update_cycle(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
    payload: Result<Json<CycleRequest>, JsonRejection>,
) -> Result<Json<CycleResponse>, ApiError> {
    let cycle_id = parse_cycle_id(&id)?;
    let Json(request) = payload?;
    let cycle = state
        .workflow
        .update_cycle(
            UpdateCycleCommand {
                cycle_id,
                details: request.into(),
            },
            metadata,
        )
        .await?;
    Ok(Json(CycleResponse::from(&cycle)))
}

/// DELETE /api/cycles/:id
pub async fn delete_cycle(
    State(state): State<AppState>,
    Caller(metadata): Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let cycle_id = parse_cycle_id(&id)?;
    state
        .workflow
        .delete_cycle(DeleteCycleCommand { cycle_id }, metadata)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
