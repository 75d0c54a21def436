//! Error types for calls to the deck service.

use thiserror::Error;

/// Errors that can occur while talking to the deck service or resolving images.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The request never produced a response (connection, timeout, body stream).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {}", detail.as_deref().unwrap_or("no details"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `detail` field of a JSON error body, or the raw body text.
        detail: Option<String>,
    },

    /// A response body could not be parsed.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A configured or symbol URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// An image source could not be fetched.
    #[error("failed to fetch {url}: {status}")]
    Fetch {
        /// The URL as the caller supplied it.
        url: String,
        /// Status line of the failed response.
        status: String,
    },

    /// Reading a local image failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ClientError {
    /// The server-provided explanation, when the service sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the deck service. Please check the server URL.",
            Self::Api { detail, .. } => detail
                .as_deref()
                .unwrap_or("The deck service rejected the request."),
            Self::Fetch { .. } | Self::Io(_) => "Could not load one of the symbol images.",
            Self::InvalidUrl(_) => "A URL is not valid.",
            Self::Decode(_) => "The deck service sent an unexpected response.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Extracts a human-readable explanation from an error response body.
///
/// JSON bodies with a string `detail` yield that string; any other `detail`
/// value is rendered as compact JSON. Non-JSON bodies are returned trimmed.
pub(crate) fn detail_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return match value.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(serde_json::Value::Null) | None => Some(trimmed.to_string()),
            Some(other) => Some(other.to_string()),
        };
    }
    Some(trimmed.to_string())
}
