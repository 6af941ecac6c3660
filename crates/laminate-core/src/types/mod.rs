//! Core data types for laminate.
//!
//! This module contains the vocabulary shared by every stage of a layering
//! run: the configuration formats, the merge strategies and the pipeline
//! stages used to annotate errors.

pub mod format;
pub mod stage;
pub mod strategy;

pub use format::Format;
pub use stage::Stage;
pub use strategy::{MergeStrategy, TOMBSTONE};
