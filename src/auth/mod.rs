//! Authentication state and credential management.
//!
//! This module provides:
//! - `SessionGate`: owns the durable "is this client authenticated" state
//! - `CredentialBundle`: the (user id, anonymous id, session token) triple
//! - `CredentialStore`: optional OS-level password storage via keyring
//!
//! The bundle is persisted to the client-local store as three fixed keys;
//! all three present means authenticated on next start.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{CredentialBundle, SessionGate};
