//! Core value types.

mod base_url;
mod user;

pub use base_url::ApiBaseUrl;
pub use user::User;
