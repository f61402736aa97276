//! HTTP client module for the authentication service.
//!
//! This module provides the `AuthClient` for the register/login exchange
//! with the external authentication service. The service is a single POST
//! endpoint speaking JSON; everything behind it (password hashing, ID
//! generation, session issuance) is opaque to this client.

pub mod client;
pub mod error;

pub use client::{AuthClient, DEFAULT_AUTH_URL};
pub use error::AuthError;
