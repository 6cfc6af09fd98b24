//! Error types for tasklane.
//!
//! One unified error type with explicit variants for transport, decoding,
//! API-level, authentication, storage and input validation failures.

use std::fmt;
use thiserror::Error;

/// Message used when the server gives a failure status without a readable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// The unified error type for tasklane operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A success response whose body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A non-2xx response from the API.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Session errors (missing or rejected refresh token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Token store failures.
    #[error("token store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (bad URL, task id, title).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this error ended the session (refresh impossible or rejected).
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::NoRefreshToken | AuthError::SessionExpired { .. })
        )
    }

    /// Returns the HTTP status that caused this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            Error::Auth(AuthError::SessionExpired { status }) => *status,
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Failure to decode a response body.
#[derive(Debug, Error)]
#[error("failed to decode response from {endpoint}: {message}")]
pub struct DecodeError {
    /// Endpoint path the body came from.
    pub endpoint: String,
    /// Underlying parser message.
    pub message: String,
}

impl DecodeError {
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

/// A failure status returned by the API.
///
/// Displays as the server-provided message, or a generic fallback when the
/// error body carried none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Message from the server's error body, if it could be decoded.
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// The message to show a user.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE)
    }

    /// Returns true for a 401 whose message marks the access token as expired.
    ///
    /// The server signals a stale access token only through its wording, so
    /// this is a case-insensitive substring match on "expired".
    pub fn is_expired_token(&self) -> bool {
        self.status == 401
            && self
                .message
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains("expired"))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Refresh was needed but the store holds no refresh token.
    #[error("no refresh token")]
    NoRefreshToken,

    /// The refresh endpoint rejected the refresh token.
    #[error("session expired")]
    SessionExpired { status: Option<u16> },

    /// Credentials were rejected or are malformed.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
}

/// Token store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Persisted data could not be parsed or written.
    #[error("malformed session data: {message}")]
    Format { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid task identifier.
    #[error("invalid task id '{value}': {reason}")]
    TaskId { value: String, reason: String },

    /// Task title is empty after trimming.
    #[error("task title must not be blank")]
    BlankTitle,

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}
