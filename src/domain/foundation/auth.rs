//! Authentication types for the domain layer.
//!
//! An [`Actor`] is the resolved identity behind a command: who is acting and
//! in which role. Actors are produced only by an `IdentityProvider` adapter;
//! the domain never accepts a caller-asserted role.

use super::{DomainError, Role, UserId};
use thiserror::Error;

/// Resolved identity of the party issuing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique user identifier from the identity provider.
    pub id: UserId,

    /// The role the identity provider granted this user.
    pub role: Role,

    /// Display name if the provider supplies one.
    pub display_name: Option<String>,
}

impl Actor {
    /// Creates a new actor.
    pub fn new(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            display_name: None,
        }
    }

    /// Builder: attach a display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns true if this actor holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Fails with `Forbidden` unless this actor holds `role`.
    pub fn require_role(&self, role: Role, action: &str) -> Result<(), DomainError> {
        if self.has_role(role) {
            return Ok(());
        }
        Err(DomainError::forbidden(format!("Only {} may {}", role, action))
            .with_detail("required_role", role.as_str()))
    }

    /// Returns the display name, or the user id as fallback.
    pub fn display_name_or_id(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Authentication errors that can occur while resolving an actor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The token is valid but carries no usable role.
    #[error("Token carries no recognised role")]
    MissingRole,

    /// The identity service is unavailable (network, config, etc.).
    #[error("Identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_display_name_falls_back_to_id() {
        let actor = Actor::new(UserId::new("emp-1").unwrap(), Role::Employee);
        assert_eq!(actor.display_name_or_id(), "emp-1");

        let named = actor.with_display_name("Ada");
        assert_eq!(named.display_name_or_id(), "Ada");
    }

    #[test]
    fn require_role_is_forbidden_for_other_roles() {
        let actor = Actor::new(UserId::new("emp-1").unwrap(), Role::Employee);
        assert!(actor.require_role(Role::Employee, "respond").is_ok());

        let err = actor.require_role(Role::Hr, "create appraisals").unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::Forbidden);
        assert_eq!(err.message, "Only HR may create appraisals");
    }

    #[test]
    fn has_role_matches_exactly() {
        let actor = Actor::new(UserId::new("hr-1").unwrap(), Role::Hr);
        assert!(actor.has_role(Role::Hr));
        assert!(!actor.has_role(Role::Manager));
    }

    #[test]
    fn auth_error_is_transient_for_service_errors() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
        assert_eq!(
            format!("{}", AuthError::service_unavailable("down")),
            "Identity service unavailable: down"
        );
    }
}
