//! Pipeline stages, used to say where a run failed.

use std::fmt;

/// A step of the layering pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadSource,
    LoadPatch,
    ApplyPatch,
    EncodeOutput,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::LoadSource => "load source",
            Stage::LoadPatch => "load patch",
            Stage::ApplyPatch => "apply patch",
            Stage::EncodeOutput => "encode output for",
        };
        f.write_str(text)
    }
}
