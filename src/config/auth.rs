//! Authentication configuration
//!
//! Two identity sources are supported and may be combined:
//!
//! - an HS256 JWT secret, for tokens minted by the organisation's IdP
//! - a static development token table, `token:user:role` entries separated
//!   by commas (rejected in production)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::foundation::Role;

const MIN_SECRET_LEN: usize = 32;

/// Authentication configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 token verification
    pub jwt_secret: Option<SecretString>,

    /// Expected `iss` claim, checked when set
    pub jwt_issuer: Option<String>,

    /// Static development tokens (`token:user:role,...`)
    pub dev_tokens: Option<String>,
}

/// One parsed development token entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevToken {
    pub token: String,
    pub user_id: String,
    pub role: Role,
}

impl AuthConfig {
    /// Returns the JWT secret bytes, if configured.
    pub fn jwt_secret_bytes(&self) -> Option<&[u8]> {
        self.jwt_secret
            .as_ref()
            .map(|s| s.expose_secret().as_bytes())
            .filter(|s| !s.is_empty())
    }

    /// Parses the development token table.
    pub fn dev_token_entries(&self) -> Result<Vec<DevToken>, ValidationError> {
        let raw = match self.dev_tokens.as_deref() {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_dev_token)
            .collect()
    }

    /// Validate authentication configuration
    ///
    /// Production requires a JWT secret and forbids development tokens.
    /// Every environment needs at least one identity source.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let dev_tokens = self.dev_token_entries()?;

        if let Some(secret) = self.jwt_secret_bytes() {
            if secret.len() < MIN_SECRET_LEN {
                return Err(ValidationError::JwtSecretTooShort);
            }
        }

        if *environment == Environment::Production {
            if self.jwt_secret_bytes().is_none() {
                return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
            }
            if !dev_tokens.is_empty() {
                return Err(ValidationError::DevTokensInProduction);
            }
        }

        if self.jwt_secret_bytes().is_none() && dev_tokens.is_empty() {
            return Err(ValidationError::NoIdentitySource);
        }
        Ok(())
    }
}

fn parse_dev_token(entry: &str) -> Result<DevToken, ValidationError> {
    let invalid = || ValidationError::InvalidDevToken(entry.to_string());
    let mut parts = entry.split(':').map(str::trim);
    let (token, user_id, role) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(t), Some(u), Some(r), None) if !t.is_empty() && !u.is_empty() => (t, u, r),
        _ => return Err(invalid()),
    };
    Ok(DevToken {
        token: token.to_string(),
        user_id: user_id.to_string(),
        role: role.parse().map_err(|_| invalid())?,
    })
}
