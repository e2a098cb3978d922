//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from provider/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Latitude/longitude out of range or not finite
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),

    /// Negative or non-finite leg distance/duration
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Empty hub identifier or name
    #[error("invalid hub: {0}")]
    InvalidHub(&'static str),

    /// Reliability outside 0..=1
    #[error("reliability score must be within 0..=1")]
    InvalidReliability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidCoordinate("components must be finite");
        assert_eq!(err.to_string(), "invalid coordinate: components must be finite");

        let err = DomainError::InvalidLeg("distance must be non-negative");
        assert_eq!(err.to_string(), "invalid leg: distance must be non-negative");

        let err = DomainError::InvalidReliability;
        assert_eq!(err.to_string(), "reliability score must be within 0..=1");
    }
}
