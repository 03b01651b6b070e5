//! Route configuration for appraisal and KPI endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::AppState;
use super::handlers::{
    create_appraisal, create_kpi, delete_appraisal, delete_kpi, get_appraisal, get_progress,
    list_appraisals, list_employee_appraisals, list_kpis, respond_to_kpis, submit_employee_review,
    submit_hod_review, submit_kpis, update_kpi,
};

/// Creates the appraisal router.
///
/// Routes:
/// - `GET /api/appraisals` - List visible appraisals
/// - `POST /api/appraisals` - Create an appraisal (HR)
/// - `GET /api/appraisals/employee/:employee_id` - List one employee's appraisals
/// - `GET /api/appraisals/:id` - Get one appraisal with KPIs
/// - `DELETE /api/appraisals/:id` - Delete an appraisal (HR)
/// - `GET /api/appraisals/:id/progress` - Scoring progress
/// - `POST /api/appraisals/:id/submit-kpis` - HR submits KPIs
/// - `POST /api/appraisals/:id/respond-kpis` - Employee accepts or rejects KPIs
/// - `POST /api/appraisals/:id/employee-review` - Employee self-review
/// - `POST /api/appraisals/:id/hod-review` - Manager review
pub fn appraisal_router() -> Router<AppState> {
    Router::new()
        .route("/api/appraisals", get(list_appraisals).post(create_appraisal))
        .route(
            "/api/appraisals/employee/:employee_id",
            get(list_employee_appraisals),
        )
        .route(
            "/api/appraisals/:id",
            get(get_appraisal).delete(delete_appraisal),
        )
        .route("/api/appraisals/:id/progress", get(get_progress))
        .route("/api/appraisals/:id/submit-kpis", post(submit_kpis))
        .route("/api/appraisals/:id/respond-kpis", post(respond_to_kpis))
        .route("/api/appraisals/:id/employee-review", post(submit_employee_review))
        .route("/api/appraisals/:id/hod-review", post(submit_hod_review))
}

/// Creates the KPI router.
///
/// Routes:
/// - `GET /api/kpis/appraisal/:appraisal_id` - KPIs of one appraisal
/// - `POST /api/kpis` - Add a KPI (HR, Draft only)
/// - `PUT /api/kpis/:id` - Revise a KPI (HR, Draft only)
/// - `DELETE /api/kpis/:id` - Remove a KPI (HR, Draft only)
pub fn kpi_router() -> Router<AppState> {
    Router::new()
        .route("/api/kpis", post(create_kpi))
        .route("/api/kpis/appraisal/:appraisal_id", get(list_kpis))
        .route("/api/kpis/:id", put(update_kpi).delete(delete_kpi))
}
