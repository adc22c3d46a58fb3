//! HTTP client layer.
//!
//! This module provides the public/private request issuers and the
//! endpoint path constants for the bookstore REST API.

mod client;
pub(crate) mod endpoints;

pub use client::{ApiResponse, PrivateClient, PublicClient, UnauthorizedHook};
