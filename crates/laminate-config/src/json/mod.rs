//! JSON codec

use laminate_core::error::LaminateError;
use laminate_core::types::Format;
use serde_json::Value;

use crate::ConfigResult;

/// Decode JSON bytes into a configuration tree
pub fn decode(bytes: &[u8]) -> ConfigResult<Value> {
    serde_json::from_slice(bytes).map_err(|e| LaminateError::Decode {
        format: Format::Json,
        message: e.to_string(),
    })
}

/// Encode a configuration tree as pretty-printed JSON
pub fn encode(tree: &Value) -> ConfigResult<Vec<u8>> {
    serde_json::to_vec_pretty(tree).map_err(|e| LaminateError::Encode {
        format: Format::Json,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_object() {
        let tree = decode(br#"{"server": {"host": "a", "port": 80}}"#).unwrap();
        assert_eq!(tree, json!({"server": {"host": "a", "port": 80}}));
    }

    #[test]
    fn test_decode_error() {
        let err = decode(b"invalid json").unwrap_err();
        assert!(matches!(err, LaminateError::Decode { format: Format::Json, .. }));
    }

    #[test]
    fn test_encode_keeps_key_order() {
        let tree = decode(br#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let text = String::from_utf8(encode(&tree).unwrap()).unwrap();
        assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    }
}
