//! Uniform error type for every backend call

use reqwest::StatusCode;
use thiserror::Error;

use crate::session::SessionError;

/// Broad classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response reached the client
    Transport,
    /// The server rejected the credential (401/403)
    Unauthenticated,
    /// Any other non-success status
    Http,
    /// The response could not be decoded into the expected record
    Shape,
    /// The request was refused before reaching the network
    Request,
    /// The session could not be persisted
    Session,
}

/// Error returned by the façade and every domain operation
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS failure, refused connection, timeout, broken body stream
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status outside 2xx
    #[error("HTTP {status}: {message}")]
    Http {
        /// Response status
        status: StatusCode,
        /// Server-provided error text, or the status reason
        message: String,
    },

    /// The body was not JSON or did not have the expected fields
    #[error("Unexpected response from {url}: {message}")]
    Shape {
        /// Requested URL
        url: String,
        /// Decoder message
        message: String,
    },

    /// A required field was blank; nothing was sent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The credential could not be persisted or removed
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status, if the server answered
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the credential
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Http { .. } if self.is_auth_failure() => ErrorKind::Unauthenticated,
            Self::Http { .. } => ErrorKind::Http,
            Self::Shape { .. } => ErrorKind::Shape,
            Self::MissingField(_) | Self::InvalidRequest(_) => ErrorKind::Request,
            Self::Session(_) => ErrorKind::Session,
        }
    }

    /// Short text suitable for a dismissible notice
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { .. } => "Could not reach the server".to_string(),
            Self::Http { message, .. } => message.clone(),
            Self::Shape { .. } => "The server sent an unexpected response".to_string(),
            Self::MissingField(field) => format!("Please fill in the {field}"),
            Self::InvalidRequest(message) => message.clone(),
            Self::Session(_) => "Could not save your session".to_string(),
        }
    }
}

/// Pull a human-readable message out of an error body
///
/// The backend answers failures with `{"error": "..."}`; anything else falls
/// back to the status reason.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"]
                .iter()
                .find_map(|field| value.get(*field)?.as_str().map(str::to_string))
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("HTTP error")
                .to_string()
        })
}
