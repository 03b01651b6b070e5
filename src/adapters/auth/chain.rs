//! Tries several identity providers in order.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{Actor, AuthError};
use crate::ports::IdentityProvider;

/// Resolves with the first provider that accepts the token.
///
/// An expired or unavailable verdict from any provider is more specific
/// than `InvalidToken` and is returned in its place.
pub struct IdentityChain {
    providers: Vec<Arc<dyn IdentityProvider>>,
}

impl IdentityChain {
    pub fn new(providers: Vec<Arc<dyn IdentityProvider>>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl IdentityProvider for IdentityChain {
    async fn resolve(&self, token: &str) -> Result<Actor, AuthError> {
        let mut verdict = AuthError::InvalidToken;
        for provider in &self.providers {
            match provider.resolve(token).await {
                Ok(actor) => return Ok(actor),
                Err(AuthError::InvalidToken) => {}
                Err(err) => verdict = err,
            }
        }
        Err(verdict)
    }
}
