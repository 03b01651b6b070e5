//! HS256 JWT identity provider.
//!
//! Validates tokens signed with a shared secret and maps their claims to an
//! [`Actor`]:
//!
//! - `sub` - the user id (required)
//! - `role` - `hr`, `employee` or `manager` (required)
//! - `name` - display name (optional)
//! - `exp` - expiry (required)
//! - `iss` - issuer, checked when an issuer is configured

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Actor, AuthError, Role, UserId};
use crate::ports::IdentityProvider;

/// Claims carried by an appraisal access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Identity provider verifying HS256 tokens.
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    issuer: Option<String>,
}

impl JwtIdentityProvider {
    pub fn new(secret: &[u8], issuer: Option<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
            issuer,
        }
    }

    /// Signs a token for `actor` that expires at `exp` (Unix seconds).
    pub fn issue(&self, actor: &Actor, exp: i64) -> Result<String, AuthError> {
        let claims = AccessClaims {
            sub: actor.id.to_string(),
            role: Some(actor.role.as_str().to_string()),
            name: actor.display_name.clone(),
            exp,
            iss: self.issuer.clone(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::service_unavailable(format!("token signing failed: {}", e)))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Actor, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation()).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            },
        )?;
        let claims = data.claims;

        let id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid subject in token");
            AuthError::InvalidToken
        })?;
        let role: Role = claims
            .role
            .as_deref()
            .ok_or(AuthError::MissingRole)?
            .parse()
            .map_err(|_| AuthError::MissingRole)?;

        let actor = Actor::new(id, role);
        Ok(match claims.name {
            Some(name) => actor.with_display_name(name),
            None => actor,
        })
    }
}

impl std::fmt::Debug for JwtIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityProvider")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn future() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    fn past() -> i64 {
        chrono::Utc::now().timestamp() - 3600
    }

    fn manager() -> Actor {
        Actor::new(UserId::new("mgr-1").unwrap(), Role::Manager).with_display_name("Grace")
    }

    fn sign(claims: &AccessClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn issued_token_resolves_to_same_actor() {
        let provider = JwtIdentityProvider::new(SECRET, Some("appraisal-flow".into()));
        let token = provider.issue(&manager(), future()).unwrap();

        assert_eq!(provider.resolve(&token).await.unwrap(), manager());
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let provider = JwtIdentityProvider::new(SECRET, None);
        let token = provider.issue(&manager(), past()).unwrap();

        assert_eq!(provider.resolve(&token).await.unwrap_err(), AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let other = JwtIdentityProvider::new(b"ffffffffffffffffffffffffffffffff", None);
        let token = other.issue(&manager(), future()).unwrap();
        let provider = JwtIdentityProvider::new(SECRET, None);

        assert_eq!(provider.resolve(&token).await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn issuer_mismatch_is_invalid() {
        let provider = JwtIdentityProvider::new(SECRET, Some("appraisal-flow".into()));
        let token = sign(&AccessClaims {
            sub: "emp-1".into(),
            role: Some("employee".into()),
            name: None,
            exp: future(),
            iss: Some("someone-else".into()),
        });

        assert_eq!(provider.resolve(&token).await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn missing_or_unknown_role_is_rejected() {
        let provider = JwtIdentityProvider::new(SECRET, None);
        for role in [None, Some("ceo".to_string())] {
            let token = sign(&AccessClaims {
                sub: "emp-1".into(),
                role,
                name: None,
                exp: future(),
                iss: None,
            });
            assert_eq!(provider.resolve(&token).await.unwrap_err(), AuthError::MissingRole);
        }
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        let provider = JwtIdentityProvider::new(SECRET, None);
        assert_eq!(
            provider.resolve("not.a.jwt").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }
}
