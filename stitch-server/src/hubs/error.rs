//! Hub registry error types.

use crate::domain::DomainError;

/// Errors that can occur when building a hub registry.
#[derive(Debug, thiserror::Error)]
pub enum HubRegistryError {
    /// Failed to read the registry file
    #[error("failed to read hub file {path}: {message}")]
    Io { path: String, message: String },

    /// Failed to parse the registry JSON
    #[error("hub file JSON parse error: {message}")]
    Json { message: String },

    /// A hub entry failed validation
    #[error("invalid hub {id:?}: {source}")]
    InvalidHub {
        id: String,
        #[source]
        source: DomainError,
    },

    /// Two hubs share an id
    #[error("duplicate hub id: {0}")]
    DuplicateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HubRegistryError::DuplicateId("dhk_farmgate".into());
        assert_eq!(err.to_string(), "duplicate hub id: dhk_farmgate");

        let err = HubRegistryError::InvalidHub {
            id: "bad".into(),
            source: DomainError::InvalidCoordinate("components must be finite"),
        };
        assert_eq!(
            err.to_string(),
            "invalid hub \"bad\": invalid coordinate: components must be finite"
        );
    }
}
