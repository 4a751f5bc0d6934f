//! Utility functions for string formatting and manipulation.

pub mod format;

pub use format::{contains_ignore_case, normalize_phone, truncate_string, whatsapp_link};
