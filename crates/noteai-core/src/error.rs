//! Error types for NoteAI.

use thiserror::Error;

/// Result type alias using NoteAI's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for NoteAI operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any I/O (empty title, empty content).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required configuration is missing or unusable (e.g. no API key).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Every candidate model failed and none signalled a quota condition.
    #[error("AI provider unavailable: {details}")]
    ProviderUnavailable { details: String },

    /// Every candidate model failed and at least one hit a quota/rate limit.
    #[error("AI quota exceeded: {details}")]
    QuotaExceeded { details: String },

    /// The store rejected a write because the optional enrichment columns
    /// (`summary`, `tags`) do not exist.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for failures that the editor recovers from with a write that
    /// omits the enrichment columns.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Error::SchemaMismatch(_))
    }
}

// =============================================================================
// PROVIDER ERRORS
// =============================================================================

/// How a failed provider invocation is treated by the candidate loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// HTTP 429: quota exhausted or requests too frequent.
    RateLimited,
    /// HTTP 404: the model identifier is unknown to the provider.
    ModelNotFound,
    /// Anything else.
    Other,
}

impl ProviderErrorKind {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            404 => Self::ModelNotFound,
            _ => Self::Other,
        }
    }
}

/// Failure of a single provider invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status.
    #[error("[{status}] {message}")]
    Http { status: u16, message: String },

    /// The request never produced an HTTP response (DNS, TLS, timeout, bad body).
    #[error("{0}")]
    Transport(String),

    /// The provider cannot be called at all with the current setup. Every
    /// candidate would fail the same way.
    #[error("{0}")]
    Misconfigured(String),
}

impl ProviderError {
    /// Build an HTTP failure.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Classify this failure.
    ///
    /// Transport failures whose message carries a `429` or `404` marker are
    /// classified like the matching status, since some gateways only surface
    /// the status inside the error text.
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            Self::Http { status, .. } => ProviderErrorKind::from_status(*status),
            Self::Transport(msg) if msg.contains("429") => ProviderErrorKind::RateLimited,
            Self::Transport(msg) if msg.contains("404") => ProviderErrorKind::ModelNotFound,
            _ => ProviderErrorKind::Other,
        }
    }

    /// HTTP status, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("content must not be empty".to_string());
        assert_eq!(err.to_string(), "Validation error: content must not be empty");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_error_display_quota() {
        let err = Error::QuotaExceeded {
            details: "[429] Resource exhausted".to_string(),
        };
        assert_eq!(err.to_string(), "AI quota exceeded: [429] Resource exhausted");
    }

    #[test]
    fn test_error_display_provider_unavailable() {
        let err = Error::ProviderUnavailable {
            details: "[404] model not found".to_string(),
        };
        assert!(err.to_string().contains("[404] model not found"));
    }

    #[test]
    fn test_schema_mismatch_predicate() {
        assert!(Error::SchemaMismatch("column \"summary\" does not exist".into()).is_schema_mismatch());
        assert!(!Error::NotFound("note".into()).is_schema_mismatch());
        assert!(!Error::Validation("x".into()).is_schema_mismatch());
    }

    #[test]
    fn test_from_sqlx_error() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::Database(_)));
        assert!(!err.is_schema_mismatch());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
        assert_send::<ProviderError>();
        assert_sync::<ProviderError>();
    }

    #[test]
    fn test_provider_kind_from_status() {
        assert_eq!(ProviderErrorKind::from_status(429), ProviderErrorKind::RateLimited);
        assert_eq!(ProviderErrorKind::from_status(404), ProviderErrorKind::ModelNotFound);
        assert_eq!(ProviderErrorKind::from_status(500), ProviderErrorKind::Other);
        assert_eq!(ProviderErrorKind::from_status(403), ProviderErrorKind::Other);
    }

    #[test]
    fn test_provider_error_kind() {
        assert_eq!(
            ProviderError::http(429, "quota").kind(),
            ProviderErrorKind::RateLimited
        );
        assert_eq!(
            ProviderError::http(404, "gone").kind(),
            ProviderErrorKind::ModelNotFound
        );
        assert_eq!(
            ProviderError::Transport("upstream said 429 Too Many Requests".into()).kind(),
            ProviderErrorKind::RateLimited
        );
        assert_eq!(
            ProviderError::Transport("connection reset".into()).kind(),
            ProviderErrorKind::Other
        );
        assert_eq!(
            ProviderError::Misconfigured("no key".into()).kind(),
            ProviderErrorKind::Other
        );
    }

    #[test]
    fn test_provider_error_display_carries_status() {
        let err = ProviderError::http(429, "Resource has been exhausted");
        assert_eq!(err.to_string(), "[429] Resource has been exhausted");
        assert_eq!(err.status(), Some(429));
        assert_eq!(ProviderError::Transport("x".into()).status(), None);
    }
}
