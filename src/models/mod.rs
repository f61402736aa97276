//! Data models for the messenger views.
//!
//! These are presentation entities with no lifecycle: the chat list, call
//! history, and conversation content are fixed sample data (see `sample`).
//! Contacts are the chat partners, so the contacts view reuses `Chat`.

pub mod call;
pub mod chat;
pub mod sample;

pub use call::{Call, CallDirection};
pub use chat::{Chat, Message};
