//! Appraisal and KPI HTTP adapter.

pub mod dto;
pub mod handlers;
mod routes;

pub use routes::{appraisal_router, kpi_router};
