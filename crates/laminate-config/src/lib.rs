//! Configuration documents for laminate
//!
//! This crate decodes the bytes fetched by `laminate-source` into a
//! configuration tree, layers patch trees onto a base tree and encodes the
//! result. The tree is a `serde_json::Value` for every format.
//!
//! ## Architecture
//!
//! - `json`, `yaml`, `toml`, `hcl`: one codec per format
//! - `registry`: the format → codec table and the detection order
//! - `detect`: extension and content based format detection
//! - `document`: a located, decoded tree with its format
//! - `merge`: the layered merge engine and the tombstone convention
//! - `serialize`: output format selection and encoding
//! - `pipeline`: base → patches → output, the whole layering run

pub mod detect;
pub mod document;
pub mod hcl;
pub mod json;
pub mod merge;
pub mod pipeline;
pub mod registry;
pub mod serialize;
pub mod toml;
pub mod yaml;

// Re-export main types
pub use detect::detect;
pub use document::ConfigDocument;
pub use merge::merge;
pub use pipeline::{LayerOutput, LayerRequest, Pipeline};
pub use registry::{Codec, DETECTION_ORDER};

use laminate_core::error::LaminateError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, LaminateError>;
