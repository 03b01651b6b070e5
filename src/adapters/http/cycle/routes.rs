//! Route configuration for cycle endpoints.

use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{create_cycle, delete_cycle, get_cycle, list_cycles, update_cycle};

/// Creates the cycle router.
///
/// Routes:
/// - `GET /api/cycles` - List cycles, latest start date first
/// - `POST /api/cycles` - Create a cycle (HR)
/// - `GET /api/cycles/:id` - Get one cycle
/// - `PUT /api/cycles/:id` - Update a cycle (HR)
/// - `DELETE /api/cycles/:id` - Delete an unused cycle (HR)
pub fn cycle_router() -> Router<AppState> {
    Router::new()
        .route("/api/cycles", get(list_cycles).post(create_cycle))
        .route(
            "/api/cycles/:id",
            get(get_cycle).put(update_cycle).delete(delete_cycle),
        )
}
