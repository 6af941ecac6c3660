//! Configuration formats understood by laminate.

use std::fmt;
use std::str::FromStr;

use crate::error::LaminateError;

/// Encoding of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    Hcl,
}

impl Format {
    /// Every supported format
    pub const ALL: [Format; 4] = [Format::Json, Format::Yaml, Format::Toml, Format::Hcl];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Hcl => "hcl",
        }
    }

    /// Map a file extension (without the dot, any case) to a format.
    ///
    /// `yml` normalizes to [`Format::Yaml`]. Unknown extensions yield `None`.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            "hcl" => Some(Format::Hcl),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = LaminateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_extension(s).ok_or_else(|| LaminateError::UnsupportedFormat {
            format: s.to_string(),
        })
    }
}
