//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering and layout
//! - `auth`: Full-screen register/login card
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `tabs`: Tab-specific content rendering (chats, calls, etc.)

pub mod auth;
pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
