//! TOML codec
//!
//! TOML is decoded through `toml::Value` so that datetimes become plain
//! strings in the configuration tree instead of toml's internal wrapper.

use laminate_core::error::LaminateError;
use laminate_core::types::Format;
use serde_json::{Map, Value};

use crate::ConfigResult;

/// Decode TOML bytes into a configuration tree
pub fn decode(bytes: &[u8]) -> ConfigResult<Value> {
    let text = std::str::from_utf8(bytes).map_err(|e| LaminateError::Decode {
        format: Format::Toml,
        message: e.to_string(),
    })?;

    let table: toml::Table = text.parse().map_err(|e: toml::de::Error| LaminateError::Decode {
        format: Format::Toml,
        message: e.message().to_string(),
    })?;

    Ok(from_toml(toml::Value::Table(table)))
}

/// Encode a configuration tree as TOML.
///
/// The root must be a mapping and TOML has no null, so trees holding nulls
/// fail to encode.
pub fn encode(tree: &Value) -> ConfigResult<Vec<u8>> {
    toml::to_string(tree)
        .map(String::into_bytes)
        .map_err(|e| LaminateError::Encode {
            format: Format::Toml,
            message: e.to_string(),
        })
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => {
            let map: Map<String, Value> = table.into_iter().map(|(k, v)| (k, from_toml(v))).collect();
            Value::Object(map)
        }
    }
}
