//! Utility functions for string formatting and manipulation.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{avatar_tag, contains_ignore_case, format_session_age, truncate};
