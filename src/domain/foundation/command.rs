//! Command infrastructure for CQRS handlers.
//!
//! Every command handler receives a [`CommandMetadata`] carrying the resolved
//! [`Actor`] plus correlation context. Identity always travels with the
//! command; nothing in the core reads a "current user" from ambient state.

use uuid::Uuid;

use super::Actor;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    /// The resolved actor executing this command.
    pub actor: Actor,

    /// Links related operations across a single user request.
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "cli", "test").
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for an actor.
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if absent.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the source, if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};

    fn actor() -> Actor {
        Actor::new(UserId::new("hr-1").unwrap(), Role::Hr)
    }

    #[test]
    fn correlation_id_is_preserved_when_set() {
        let metadata = CommandMetadata::new(actor()).with_correlation_id("req-42");
        assert_eq!(metadata.correlation_id(), "req-42");
    }

    #[test]
    fn correlation_id_is_generated_when_absent() {
        let metadata = CommandMetadata::new(actor());
        assert!(Uuid::parse_str(&metadata.correlation_id()).is_ok());
    }

    #[test]
    fn source_builder_sets_source() {
        let metadata = CommandMetadata::new(actor()).with_source("api");
        assert_eq!(metadata.source(), Some("api"));
    }
}
