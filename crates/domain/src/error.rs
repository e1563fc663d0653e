//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`MiniHubError`]
//! via `#[from]` (no `String` variants).

/// Top-level error shared by every crate of the workspace.
#[derive(Debug, thiserror::Error)]
pub enum MiniHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Failure reported by an integration adapter.
    #[error("integration error")]
    Integration(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    /// Entity ids follow the `<domain>.<object_id>` convention.
    #[error("invalid entity id {0:?}, expected `<domain>.<object_id>`")]
    InvalidEntityId(String),
}

/// A lookup did not match any known record.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_found_with_kind_and_id() {
        let err = NotFoundError {
            entity: "Entity",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Entity abc not found");
    }

    #[test]
    fn should_convert_validation_error_into_minihub_error() {
        let err: MiniHubError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            MiniHubError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_quote_offending_entity_id() {
        let err = ValidationError::InvalidEntityId("nodot".to_string());
        assert_eq!(
            err.to_string(),
            "invalid entity id \"nodot\", expected `<domain>.<object_id>`"
        );
    }
}
