//! Transient credential types for login and registration.
//!
//! These exist only for the duration of a submit operation and are
//! never persisted. Validation runs before any network call.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, InvalidInputError};

const MIN_PASSWORD_LEN: usize = 6;

/// Login form input.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent
/// accidental logging.
#[derive(Clone, Serialize)]
pub struct LoginInput {
    email: String,
    password: String,
}

impl LoginInput {
    /// Create login input.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Validate the input before submission.
    ///
    /// # Errors
    ///
    /// Returns an error for empty fields or an implausible email.
    /// These failures never reach the network layer.
    pub fn validate(&self) -> Result<(), Error> {
        if self.email.trim().is_empty() {
            return Err(InvalidInputError::MissingField { field: "email" }.into());
        }
        if !looks_like_email(&self.email) {
            return Err(InvalidInputError::Email {
                value: self.email.clone(),
            }
            .into());
        }
        if self.password.is_empty() {
            return Err(InvalidInputError::MissingField { field: "password" }.into());
        }
        Ok(())
    }
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration form input.
#[derive(Clone, Serialize)]
pub struct RegisterInput {
    username: String,
    email: String,
    password: String,
}

impl RegisterInput {
    /// Create registration input.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Validate the input before submission.
    ///
    /// Registration additionally enforces the minimum password length.
    pub fn validate(&self) -> Result<(), Error> {
        if self.username.trim().is_empty() {
            return Err(InvalidInputError::MissingField { field: "username" }.into());
        }
        if self.email.trim().is_empty() {
            return Err(InvalidInputError::MissingField { field: "email" }.into());
        }
        if !looks_like_email(&self.email) {
            return Err(InvalidInputError::Email {
                value: self.email.clone(),
            }
            .into());
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(InvalidInputError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Minimal plausibility check; real validation is the server's job.
fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
