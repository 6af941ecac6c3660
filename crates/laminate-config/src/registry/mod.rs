//! Parser registry: one encode/decode pair per supported format
//!
//! [`DETECTION_ORDER`] is also the order in which content sniffing tries the
//! decoders. JSON comes first because it is the strictest grammar, and TOML
//! precedes YAML because YAML accepts much TOML-looking text as a degenerate
//! mapping.

use laminate_core::types::Format;
use serde_json::Value;

use crate::ConfigResult;

/// Decoder from raw bytes to a configuration tree
pub type DecodeFn = fn(&[u8]) -> ConfigResult<Value>;

/// Encoder from a configuration tree to raw bytes
pub type EncodeFn = fn(&Value) -> ConfigResult<Vec<u8>>;

/// Encode/decode pair for one format
#[derive(Clone, Copy)]
pub struct Codec {
    pub format: Format,
    pub decode: DecodeFn,
    pub encode: EncodeFn,
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").field("format", &self.format).finish()
    }
}

const JSON: Codec = Codec {
    format: Format::Json,
    decode: crate::json::decode,
    encode: crate::json::encode,
};

const TOML: Codec = Codec {
    format: Format::Toml,
    decode: crate::toml::decode,
    encode: crate::toml::encode,
};

const YAML: Codec = Codec {
    format: Format::Yaml,
    decode: crate::yaml::decode,
    encode: crate::yaml::encode,
};

const HCL: Codec = Codec {
    format: Format::Hcl,
    decode: crate::hcl::decode,
    encode: crate::hcl::encode,
};

/// Every codec, in content-sniffing order
pub const DETECTION_ORDER: [Codec; 4] = [JSON, TOML, YAML, HCL];

/// Codec for a format
pub fn codec(format: Format) -> Codec {
    match format {
        Format::Json => JSON,
        Format::Toml => TOML,
        Format::Yaml => YAML,
        Format::Hcl => HCL,
    }
}

/// Decode bytes with the codec for `format`
pub fn decode(format: Format, bytes: &[u8]) -> ConfigResult<Value> {
    (codec(format).decode)(bytes)
}

/// Encode a tree with the codec for `format`
pub fn encode(format: Format, tree: &Value) -> ConfigResult<Vec<u8>> {
    (codec(format).encode)(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_order() {
        let order: Vec<Format> = DETECTION_ORDER.iter().map(|c| c.format).collect();
        assert_eq!(order, vec![Format::Json, Format::Toml, Format::Yaml, Format::Hcl]);
    }

    #[test]
    fn test_codec_lookup_matches_format() {
        for format in Format::ALL {
            assert_eq!(codec(format).format, format);
        }
    }
}
