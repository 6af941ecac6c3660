//! Error types and result aliases for laminate operations.
//!
//! Every failure in a layering run is fatal, so a single error type covers
//! the whole pipeline: locator parsing, backend fetches, format detection,
//! decoding, merging and encoding.

use crate::types::{Format, Stage};
use thiserror::Error;

/// Unified error type for all laminate operations
#[derive(Error, Debug)]
pub enum LaminateError {
    // Locator errors
    #[error("Failed to parse locator '{locator}': {message}")]
    LocatorParse { locator: String, message: String },

    #[error("Unsupported locator scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    #[error("Invalid {scheme} locator, {component} required: {usage}")]
    MissingComponent {
        scheme: String,
        component: String,
        usage: String,
    },

    // Backend errors
    #[error("Failed to fetch '{locator}': {message}")]
    BackendFetch {
        locator: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Format errors
    #[error("Unable to detect configuration format of '{locator}'")]
    FormatUndetectable { locator: String },

    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Failed to decode {format}: {message}")]
    Decode { format: Format, message: String },

    #[error("Failed to encode {format}: {message}")]
    Encode { format: Format, message: String },

    #[error("Encoded {format} output is empty")]
    EmptyOutput { format: Format },

    // Merge errors
    #[error("Invalid merge strategy: {strategy}")]
    InvalidMergeStrategy { strategy: String },

    #[error("Cannot merge: expected {expected} at document root, found {found}")]
    TypeMismatch { expected: String, found: String },

    // Pipeline context
    #[error("Failed to {stage} '{locator}'")]
    Stage {
        stage: Stage,
        locator: String,
        #[source]
        source: Box<LaminateError>,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for laminate operations
pub type LaminateResult<T> = Result<T, LaminateError>;

impl LaminateError {
    /// Create a backend fetch error from any error type
    pub fn fetch<E>(locator: impl Into<String>, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::BackendFetch {
            locator: locator.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a backend fetch error that has no underlying cause
    pub fn fetch_message(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendFetch {
            locator: locator.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a missing-component error for a locator scheme
    pub fn missing(scheme: &str, component: &str, usage: &str) -> Self {
        Self::MissingComponent {
            scheme: scheme.to_string(),
            component: component.to_string(),
            usage: usage.to_string(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Wrap this error with the pipeline stage and locator it happened in
    pub fn in_stage(self, stage: Stage, locator: impl Into<String>) -> Self {
        Self::Stage {
            stage,
            locator: locator.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any stage wrappers
    pub fn root(&self) -> &LaminateError {
        match self {
            LaminateError::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self.root() {
            LaminateError::UnsupportedScheme { .. } => {
                Some("Supported schemes are file, http, https, s3, appconfig, vault and consul")
            },
            LaminateError::FormatUndetectable { .. } => {
                Some("Force a format with a scheme hint such as 'file+yaml://' or 'http+json://'")
            },
            LaminateError::UnsupportedFormat { .. } => {
                Some("Supported formats are json, yaml (yml), toml and hcl")
            },
            LaminateError::InvalidMergeStrategy { .. } => {
                Some("Use --merge-strategy overwrite or --merge-strategy preserve")
            },
            LaminateError::EmptyOutput { .. } => {
                Some("The merged document may not be representable in this format; try --output-format json")
            },
            _ => None,
        }
    }
}
