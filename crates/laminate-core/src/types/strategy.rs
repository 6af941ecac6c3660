//! Merge strategies and the tombstone sentinel.

use std::fmt;
use std::str::FromStr;

use crate::error::LaminateError;

/// Scalar string that, as a patch value, deletes its key from the result.
pub const TOMBSTONE: &str = "__TOMBSTONE__";

/// How lists are combined when a patch is merged onto a document.
///
/// Maps always deep-merge and scalars always overwrite; the strategy only
/// decides what happens when both sides hold a list under the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    /// The patch's list replaces the destination's list
    #[default]
    Overwrite,
    /// The patch's list is appended to the destination's list
    Preserve,
}

impl MergeStrategy {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::Overwrite => "overwrite",
            MergeStrategy::Preserve => "preserve",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = LaminateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(MergeStrategy::Overwrite),
            "preserve" => Ok(MergeStrategy::Preserve),
            other => Err(LaminateError::InvalidMergeStrategy {
                strategy: other.to_string(),
            }),
        }
    }
}
