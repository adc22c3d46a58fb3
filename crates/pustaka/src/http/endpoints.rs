//! API endpoint paths and shared wire types.

use serde::Deserialize;

use crate::error::{ApiError, Error, TransportError};
use crate::session::RegisteredUser;
use crate::types::User;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST /auth/login
pub const AUTH_LOGIN: &str = "/auth/login";

/// POST /auth/register
pub const AUTH_REGISTER: &str = "/auth/register";

/// GET/POST /books
pub const BOOKS: &str = "/books";

/// GET /genre
pub const GENRES: &str = "/genre";

/// GET/POST /transactions
pub const TRANSACTIONS: &str = "/transactions";

// ============================================================================
// Auth Wire Types
// ============================================================================

/// Response from POST /auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<LoginData>,
}

/// Payload of a successful login.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: User,
}

/// Response from POST /auth/register.
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<RegisteredUser>,
}

/// Error response body; only the message is consumed.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Check the `success` flag of a 2xx envelope.
///
/// Some failures arrive as a 2xx response that declares
/// `success: false`; surface those as API errors carrying the
/// server message and the status the envelope arrived with.
pub fn ensure_declared_success(
    status: u16,
    success: bool,
    message: Option<String>,
) -> Result<(), Error> {
    if success {
        Ok(())
    } else {
        Err(ApiError::new(status, message).into())
    }
}

/// Unwrap the `data` payload of an envelope that declared success.
///
/// `data` is optional in every envelope so that declared failures
/// parse even without it; a successful envelope missing it is a
/// malformed response.
pub fn require_data<T>(data: Option<T>) -> Result<T, Error> {
    data.ok_or_else(|| {
        TransportError::Decode {
            message: "response envelope missing data".to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_failure_carries_message() {
        let err =
            ensure_declared_success(200, false, Some("Out of stock".to_string())).unwrap_err();
        assert!(err.to_string().contains("Out of stock"));
    }

    #[test]
    fn declared_failure_keeps_envelope_status() {
        let err = ensure_declared_success(201, false, None).unwrap_err();
        assert!(err.to_string().contains("HTTP 201"));
    }

    #[test]
    fn declared_success_passes() {
        assert!(ensure_declared_success(200, true, None).is_ok());
    }
}
