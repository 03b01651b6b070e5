//! Static token table identity provider.
//!
//! Maps opaque tokens to fixed actors. Used for local development and
//! tests in place of a real identity service.
//!
//! # Example
//!
//! ```ignore
//! let provider = StaticIdentityProvider::new()
//!     .with_actor("hr-token", Actor::new(UserId::new("hr-1")?, Role::Hr));
//!
//! let actor = provider.resolve("hr-token").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{Actor, AuthError};
use crate::ports::IdentityProvider;

/// Identity provider backed by a fixed token table.
///
/// Tokens not in the table return `InvalidToken`.
#[derive(Debug, Default, Clone)]
pub struct StaticIdentityProvider {
    tokens: HashMap<String, Actor>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token that resolves to `actor`.
    pub fn with_actor(mut self, token: impl Into<String>, actor: Actor) -> Self {
        self.tokens.insert(token.into(), actor);
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Actor, AuthError> {
        self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}
