//! Authentication adapters.
//!
//! Implementations of the `IdentityProvider` port:
//!
//! - `jwt` - HS256 tokens signed with a shared secret
//! - `static_tokens` - a fixed token table for development and tests
//! - `chain` - tries several providers in order

mod chain;
mod jwt;
mod static_tokens;

pub use chain::IdentityChain;
pub use jwt::{AccessClaims, JwtIdentityProvider};
pub use static_tokens::StaticIdentityProvider;

use std::sync::Arc;

use crate::config::{AuthConfig, ValidationError};
use crate::domain::foundation::{Actor, UserId};
use crate::ports::IdentityProvider;

/// Builds the identity provider described by `auth`.
///
/// Development tokens are consulted before JWTs when both are configured.
pub fn identity_provider_from(auth: &AuthConfig) -> Result<Arc<dyn IdentityProvider>, ValidationError> {
    let mut providers: Vec<Arc<dyn IdentityProvider>> = Vec::new();

    let entries = auth.dev_token_entries()?;
    if !entries.is_empty() {
        let mut table = StaticIdentityProvider::new();
        for entry in entries {
            let id = UserId::new(entry.user_id)
                .map_err(|_| ValidationError::InvalidDevToken(entry.token.clone()))?;
            table = table.with_actor(entry.token, Actor::new(id, entry.role));
        }
        tracing::warn!(tokens = table.len(), "development tokens enabled");
        providers.push(Arc::new(table));
    }

    if let Some(secret) = auth.jwt_secret_bytes() {
        providers.push(Arc::new(JwtIdentityProvider::new(
            secret,
            auth.jwt_issuer.clone(),
        )));
    }

    match providers.len() {
        0 => Err(ValidationError::NoIdentitySource),
        1 => Ok(providers.remove(0)),
        _ => Ok(Arc::new(IdentityChain::new(providers))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Role;
    use secrecy::SecretString;

    fn config(secret: Option<&str>, dev_tokens: Option<&str>) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.map(|s| SecretString::new(s.to_string())),
            jwt_issuer: None,
            dev_tokens: dev_tokens.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn dev_tokens_resolve_to_configured_actors() {
        let provider =
            identity_provider_from(&config(None, Some("hr-t:hr-1:hr, mgr-t:mgr-1:hod"))).unwrap();

        let hr = provider.resolve("hr-t").await.unwrap();
        assert_eq!(hr.id.as_str(), "hr-1");
        assert_eq!(hr.role, Role::Hr);
        assert_eq!(provider.resolve("mgr-t").await.unwrap().role, Role::Manager);
    }

    #[tokio::test]
    async fn both_sources_are_chained() {
        let secret = "0123456789abcdef0123456789abcdef";
        let provider =
            identity_provider_from(&config(Some(secret), Some("emp-t:emp-1:employee"))).unwrap();

        let actor = Actor::new(UserId::new("mgr-9").unwrap(), Role::Manager);
        let token = JwtIdentityProvider::new(secret.as_bytes(), None)
            .issue(&actor, chrono::Utc::now().timestamp() + 60)
            .unwrap();

        assert_eq!(provider.resolve(&token).await.unwrap(), actor);
        assert_eq!(provider.resolve("emp-t").await.unwrap().role, Role::Employee);
    }

    #[test]
    fn no_source_is_rejected() {
        assert_eq!(
            identity_provider_from(&config(None, None)).err(),
            Some(ValidationError::NoIdentitySource)
        );
    }
}
