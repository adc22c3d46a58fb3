//! User profile type.

use serde::{Deserialize, Serialize};

/// A user profile as returned by the API and mirrored into the
/// session store alongside the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}
