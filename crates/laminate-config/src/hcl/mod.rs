//! HCL codec
//!
//! Blocks decode into nested mappings keyed by block type and labels, so
//! `resource "aws_instance" "web" {}` becomes
//! `{"resource": {"aws_instance": {"web": {}}}}`. Encoding writes every
//! mapping entry as an attribute.

use laminate_core::error::LaminateError;
use laminate_core::types::Format;
use serde_json::Value;

use crate::ConfigResult;

/// Decode HCL bytes into a configuration tree
pub fn decode(bytes: &[u8]) -> ConfigResult<Value> {
    let text = std::str::from_utf8(bytes).map_err(|e| LaminateError::Decode {
        format: Format::Hcl,
        message: e.to_string(),
    })?;

    hcl::from_str(text).map_err(|e| LaminateError::Decode {
        format: Format::Hcl,
        message: e.to_string(),
    })
}

/// Encode a configuration tree as an HCL body
pub fn encode(tree: &Value) -> ConfigResult<Vec<u8>> {
    hcl::to_string(tree)
        .map(String::into_bytes)
        .map_err(|e| LaminateError::Encode {
            format: Format::Hcl,
            message: e.to_string(),
        })
}
