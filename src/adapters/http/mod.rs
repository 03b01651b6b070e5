//! HTTP adapters - REST API over the appraisal workflow.
//!
//! Every `/api` route sits behind [`middleware::auth_middleware`]; only
//! `/health` is open.

pub mod appraisal;
pub mod cycle;
pub mod error;
pub mod middleware;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::application::AppraisalWorkflow;
use crate::ports::IdentityProvider;

pub use error::{ApiError, ErrorResponse};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<AppraisalWorkflow>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(workflow: Arc<AppraisalWorkflow>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { workflow, identity }
    }
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Builds the full API router.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(appraisal::appraisal_router())
        .merge(appraisal::kpi_router())
        .merge(cycle::cycle_router())
        .route_layer(axum::middleware::from_fn_with_state(
            state.identity.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
}
