//! Error types for the Todoist client.
//!
//! # Design
//! Every failure is returned, nothing panics. Callers branch on
//! `ApiError::kind()` to decide whether to retry, re-authenticate or give
//! up; the variants themselves carry the detail for logging.

use thiserror::Error;

/// Failure reported by a `Transport` when no HTTP response was obtained
/// (DNS, refused connection, transport-level timeout).
#[derive(Debug, Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by `AuthClient` and `TaskClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was empty. Detected before any request is sent.
    #[error("invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),

    /// A configured base URL could not be used to build a request URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API answered with a status other than the one the operation expects.
    #[error("request rejected: {status_text}")]
    RemoteRejection { status: u16, status_text: String },

    /// A success response body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),

    /// The authorization server redirected back with an `error` parameter.
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    /// The `state` returned on the redirect did not match the one sent.
    #[error("authorization state mismatch")]
    StateMismatch,
}

/// Coarse classification of `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Transport,
    RemoteRejection,
    Decode,
    Authorization,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidArgument(_) | ApiError::InvalidEndpoint(_) | ApiError::Encode(_) => {
                ErrorKind::InvalidArgument
            }
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::RemoteRejection { .. } => ErrorKind::RemoteRejection,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::AuthorizationDenied(_) | ApiError::StateMismatch => ErrorKind::Authorization,
        }
    }

    /// HTTP status of a rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RemoteRejection { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether repeating the same call may succeed: transport failures,
    /// rate limiting and server-side errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::RemoteRejection { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether the token was refused and the caller should re-authenticate.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
