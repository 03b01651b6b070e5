//! Identity provider port.
//!
//! Resolves a bearer token to the [`Actor`] behind a request. The core never
//! trusts a caller-asserted role; every actor comes through this port.
//!
//! # Contract
//!
//! Implementations must:
//! - Return `AuthError::InvalidToken` for unknown, malformed or badly signed tokens
//! - Return `AuthError::TokenExpired` for expired tokens
//! - Return `AuthError::MissingRole` when the token carries no usable role
//! - Return `AuthError::ServiceUnavailable` for transient errors

use async_trait::async_trait;

use crate::domain::foundation::{Actor, AuthError};

/// Resolves access tokens into actors.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a raw token (without the "Bearer " prefix) to an actor.
    async fn resolve(&self, token: &str) -> Result<Actor, AuthError>;
}
