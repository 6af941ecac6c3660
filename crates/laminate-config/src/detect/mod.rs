//! Format detection
//!
//! A format forced by the locator always wins and never reaches this module.
//! Otherwise the path extension decides, and failing that each decoder in
//! [`DETECTION_ORDER`] is tried on the content until one yields a mapping
//! with at least one key.

use std::path::Path;

use laminate_core::types::Format;
use laminate_core::utils::get_extension;
use serde_json::Value;
use tracing::debug;

use crate::registry::DETECTION_ORDER;

/// Detect the format of `bytes`, using `path` for an extension hint
pub fn detect(bytes: &[u8], path: Option<&str>) -> Option<Format> {
    if let Some(format) = detect_from_extension(path) {
        debug!("Detected {} from extension of {:?}", format, path);
        return Some(format);
    }
    sniff(bytes)
}

/// Format named by the extension of `path`
pub fn detect_from_extension(path: Option<&str>) -> Option<Format> {
    path.and_then(|p| get_extension(Path::new(p)))
        .and_then(|ext| Format::from_extension(&ext))
}

/// Try each decoder in order; the first non-empty mapping wins
pub fn sniff(bytes: &[u8]) -> Option<Format> {
    DETECTION_ORDER
        .iter()
        .find(|codec| match (codec.decode)(bytes) {
            Ok(Value::Object(map)) => !map.is_empty(),
            Ok(_) => {
                debug!("{} decoded content, but not to a non-empty mapping", codec.format);
                false
            },
            Err(_) => false,
        })
        .map(|codec| {
            debug!("Detected {} from content", codec.format);
            codec.format
        })
}
