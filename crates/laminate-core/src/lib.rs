//! # laminate-core
//!
//! Core types and utilities shared across all laminate crates.
//!
//! This crate provides:
//! - `Format` and `MergeStrategy`, the two closed vocabularies of a layering run
//! - `LaminateError`, the unified error type, and the `LaminateResult` alias
//! - Path helpers used to turn bare locators into absolute file URIs
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Format, MergeStrategy, Stage)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{LaminateError, LaminateResult};
pub use types::{Format, MergeStrategy, Stage, TOMBSTONE};
