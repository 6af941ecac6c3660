//! YAML codec
//!
//! Merge keys (`<<: *anchor`) are expanded while decoding, and an empty or
//! comment-only document decodes to an empty mapping.

use laminate_core::error::LaminateError;
use laminate_core::types::Format;
use serde_json::{Map, Value};

use crate::ConfigResult;

fn decode_error(e: serde_yaml::Error) -> LaminateError {
    LaminateError::Decode {
        format: Format::Yaml,
        message: e.to_string(),
    }
}

/// Decode YAML bytes into a configuration tree
pub fn decode(bytes: &[u8]) -> ConfigResult<Value> {
    let mut document: serde_yaml::Value = serde_yaml::from_slice(bytes).map_err(decode_error)?;
    document.apply_merge().map_err(decode_error)?;

    match serde_yaml::from_value(document).map_err(decode_error)? {
        Value::Null => Ok(Value::Object(Map::new())),
        tree => Ok(tree),
    }
}

/// Encode a configuration tree as YAML
pub fn encode(tree: &Value) -> ConfigResult<Vec<u8>> {
    serde_yaml::to_string(tree)
        .map(String::into_bytes)
        .map_err(|e| LaminateError::Encode {
            format: Format::Yaml,
            message: e.to_string(),
        })
}
