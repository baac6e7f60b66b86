//! Domain errors for the Deno Deploy adapter.

use thiserror::Error;

/// Errors raised while planning, issuing or interpreting Deno Deploy calls.
#[derive(Debug, Clone, Error)]
pub enum DenoDeployError {
    /// Input rejected before any network call was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The API answered with a non-2xx status.
    #[error("Deno Deploy API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
        /// API-specific error code, when the body carries one.
        code: Option<String>,
        /// Value of the `retry-after` header in seconds, when present.
        retry_after: Option<u64>,
    },

    /// The request never produced an HTTP response.
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Poll state error: {0}")]
    State(String),
}

/// Result alias used throughout the adapter.
pub type DomainResult<T> = Result<T, DenoDeployError>;

impl DenoDeployError {
    /// Whether the API rejected the request with HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api { status: 429, .. })
    }

    /// Server-supplied retry hint in seconds.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// API error code, if the error body carried one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Shorthand for a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<serde_json::Error> for DenoDeployError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A failure tied to the input item that caused it.
///
/// Returned by the operation executor when continue-on-failure is off, so
/// the caller knows which item aborted the run.
#[derive(Debug, Error)]
#[error("item {item_index}: {source}")]
pub struct ExecutionError {
    /// Zero-based index of the failing input item.
    pub item_index: usize,
    /// Underlying error.
    #[source]
    pub source: DenoDeployError,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, retry_after: Option<u64>) -> DenoDeployError {
        DenoDeployError::Api {
            status,
            message: "boom".to_string(),
            code: Some("internalServerError".to_string()),
            retry_after,
        }
    }

    #[test]
    fn test_error_display() {
        let err = DenoDeployError::validation("projectId is required");
        assert_eq!(err.to_string(), "Validation failed: projectId is required");

        let err = api_error(404, None);
        assert_eq!(err.to_string(), "Deno Deploy API error (404): boom");

        let err = DenoDeployError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(api_error(429, Some(3)).is_rate_limited());
        assert!(!api_error(500, None).is_rate_limited());
        assert!(!DenoDeployError::Transport("x".to_string()).is_rate_limited());
    }

    #[test]
    fn test_accessors() {
        let err = api_error(429, Some(7));
        assert_eq!(err.retry_after(), Some(7));
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.code(), Some("internalServerError"));

        let err = DenoDeployError::validation("x");
        assert_eq!(err.retry_after(), None);
        assert_eq!(err.status(), None);
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_execution_error_carries_index() {
        let err = ExecutionError {
            item_index: 2,
            source: api_error(400, None),
        };
        assert_eq!(err.to_string(), "item 2: Deno Deploy API error (400): boom");
    }
}
