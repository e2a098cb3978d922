//! Directions provider error types.

use std::sync::Arc;

/// Errors from a directions provider.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider answered but reported a failure status in the body
    #[error("provider status {status}: {message}")]
    Status { status: String, message: String },

    /// No route exists for this origin/destination/mode
    #[error("no route found")]
    NoRoute,

    /// Invalid API key or unauthorized
    #[error("unauthorized (check DIRECTIONS_API_KEY)")]
    Unauthorized,

    /// Rate limited by the provider
    #[error("rate limited by directions provider")]
    RateLimited,

    /// Provider not configured or not available
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// One failure handed to every caller that waited on the same request
    #[error(transparent)]
    Shared(Arc<DirectionsError>),
}

impl DirectionsError {
    /// Whether this failure means the provider itself cannot serve requests,
    /// as opposed to a single route being unavailable.
    pub fn is_provider_level(&self) -> bool {
        match self {
            DirectionsError::Shared(inner) => inner.is_provider_level(),
            _ => matches!(
                self,
                DirectionsError::Http(_)
                    | DirectionsError::Unauthorized
                    | DirectionsError::NotConfigured(_)
            ),
        }
    }
}

impl From<Arc<DirectionsError>> for DirectionsError {
    fn from(e: Arc<DirectionsError>) -> Self {
        Arc::try_unwrap(e).unwrap_or_else(DirectionsError::Shared)
    }
}
