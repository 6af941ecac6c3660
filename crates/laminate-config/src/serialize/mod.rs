//! Output encoding

use laminate_core::error::LaminateError;
use laminate_core::types::Format;
use serde_json::Value;
use tracing::debug;

use crate::registry;
use crate::ConfigResult;

/// An explicitly requested format wins over the base document's format
pub fn output_format(requested: Option<Format>, base: Format) -> Format {
    requested.unwrap_or(base)
}

/// Encode a tree; zero bytes of output is an error
pub fn encode(tree: &Value, format: Format) -> ConfigResult<Vec<u8>> {
    let bytes = registry::encode(format, tree)?;
    if bytes.is_empty() {
        return Err(LaminateError::EmptyOutput { format });
    }
    debug!("Encoded {} bytes of {}", bytes.len(), format);
    Ok(bytes)
}
