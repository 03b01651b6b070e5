//! Cycle HTTP adapter.

pub mod dto;
pub mod handlers;
mod routes;

pub use routes::cycle_router;
