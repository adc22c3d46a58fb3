//! Error types for the pustaka library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, input validation, and session storage
//! errors, so callers must handle failure paths at the service-call
//! boundary instead of relying on implicit throw-style control flow.

use std::fmt;
use thiserror::Error;

/// The unified error type for pustaka operations.
///
/// Each variant corresponds to one class of failure in the error
/// taxonomy: transport/parse, authentication (401 on the private
/// client), application (server-declared failure with a message),
/// local input validation, and session store I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (session expired or missing).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// API errors (non-2xx responses, declared failures).
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (bad credentials format, bad URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Session store I/O errors.
    #[error("session store error: {0}")]
    Storage(#[source] std::io::Error),
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

    /// Response body could not be decoded.
    #[error("malformed response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the bearer token (401). The session has
    /// already been torn down globally by the time this is returned.
    #[error("session expired")]
    SessionExpired,

    /// An authenticated operation was attempted without a session.
    #[error("authentication required")]
    NotAuthenticated,
}

/// An error response from the bookstore API.
///
/// Covers both non-2xx responses and 2xx envelopes that declare
/// `success: false`. The server-supplied message is surfaced verbatim
/// when present.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Error message from the server body, if it could be parsed.
    pub message: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// The server message, or a generic fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Check if this is an authorization failure.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Input validation errors.
///
/// These are raised before any network call is made.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A required field was left empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Email does not look like an email address.
    #[error("invalid email address '{value}'")]
    Email { value: String },

    /// Password is too short.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
