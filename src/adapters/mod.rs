//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory repositories (default storage, tests)
//! - `postgres` - PostgreSQL repositories
//! - `auth` - Identity providers (JWT, static token table)
//! - `http` - axum REST API

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::{IdentityChain, JwtIdentityProvider, StaticIdentityProvider};
pub use http::{api_router, AppState};
pub use memory::{InMemoryAppraisalRepository, InMemoryCycleRepository};
pub use postgres::{PostgresAppraisalRepository, PostgresCycleRepository};
