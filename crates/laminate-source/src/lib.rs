//! Configuration sources for laminate
//!
//! This crate turns a locator string (`-`, a bare path, or a
//! `scheme[+format]://...` URI) into the raw bytes of a configuration
//! document. Each URI scheme is served by a [`Backend`]; the
//! [`SourceResolver`] owns the scheme table and standard input.

pub mod backend;
pub mod locator;
pub mod resolver;

// Re-export main types
pub use backend::{Address, Backend};
pub use locator::{Locator, Scheme};
pub use resolver::{Resolved, SourceResolver};

use laminate_core::error::LaminateError;

/// Result type for source operations
pub type SourceResult<T> = Result<T, LaminateError>;
