//! Utility functions and helpers.
//!
//! Common functionality used across multiple laminate crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{absolute_path, get_extension, normalize_path};
