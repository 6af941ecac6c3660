//! Configuration documents
//!
//! A [`ConfigDocument`] is a decoded tree together with the locator it came
//! from and the format it was decoded with. The format is fixed once the
//! document exists; the tree only changes as the destination of a merge.

use laminate_core::error::LaminateError;
use laminate_core::types::{Format, MergeStrategy};
use laminate_source::{Resolved, SourceResolver};
use serde_json::Value;
use tracing::debug;

use crate::{detect, merge, registry, serialize, ConfigResult};

/// A located, decoded configuration tree
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    locator: String,
    format: Format,
    tree: Value,
}

impl ConfigDocument {
    /// Fetch, detect and decode the document behind a locator
    pub fn load(resolver: &SourceResolver, locator: &str) -> ConfigResult<Self> {
        let resolved = resolver.resolve(locator)?;
        Self::from_resolved(resolved)
    }

    /// Decode fetched bytes, honouring the locator's format hint
    pub fn from_resolved(resolved: Resolved) -> ConfigResult<Self> {
        let locator = resolved.locator.to_string();
        let format = match resolved.format_hint {
            Some(format) => {
                debug!("Using {} for {} from locator hint", format, locator);
                format
            },
            None => detect::detect(&resolved.bytes, resolved.path.as_deref())
                .ok_or_else(|| LaminateError::FormatUndetectable { locator: locator.clone() })?,
        };

        Self::from_bytes(locator, &resolved.bytes, format)
    }

    /// Decode bytes with a known format
    pub fn from_bytes(locator: impl Into<String>, bytes: &[u8], format: Format) -> ConfigResult<Self> {
        let locator = locator.into();
        let tree = registry::decode(format, bytes)?;
        debug!("Decoded {} as {}", locator, format);
        Ok(Self { locator, format, tree })
    }

    /// Wrap an already decoded tree
    pub fn from_tree(locator: impl Into<String>, format: Format, tree: Value) -> Self {
        Self {
            locator: locator.into(),
            format,
            tree,
        }
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Consume the document, keeping only the tree
    pub fn into_tree(self) -> Value {
        self.tree
    }

    /// Merge a patch document onto this one in place
    pub fn merge(&mut self, patch: ConfigDocument, strategy: MergeStrategy) -> ConfigResult<()> {
        debug!("Merging {} onto {} ({})", patch.locator, self.locator, strategy);
        merge::merge(&mut self.tree, patch.tree, strategy)
    }

    /// Encode in the requested format, or in this document's own format
    pub fn encode(&self, requested: Option<Format>) -> ConfigResult<Vec<u8>> {
        serialize::encode(&self.tree, serialize::output_format(requested, self.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laminate_source::Locator;
    use serde_json::json;

    fn resolved(bytes: &str, format_hint: Option<Format>, path: Option<&str>) -> Resolved {
        Resolved {
            locator: Locator::Stdin,
            bytes: bytes.as_bytes().to_vec(),
            format_hint,
            path: path.map(str::to_string),
        }
    }

    #[test]
    fn test_hint_beats_extension_and_content() {
        // Valid JSON, named .json, forced to YAML
        let doc = ConfigDocument::from_resolved(resolved(
            r#"{"key": "value"}"#,
            Some(Format::Yaml),
            Some("/srv/app.json"),
        ))
        .unwrap();
        assert_eq!(doc.format(), Format::Yaml);
        assert_eq!(doc.tree(), &json!({"key": "value"}));
    }

    #[test]
    fn test_hint_with_bad_content_is_decode_error() {
        let err = ConfigDocument::from_resolved(resolved("key: [", Some(Format::Json), None)).unwrap_err();
        assert!(matches!(err, LaminateError::Decode { format: Format::Json, .. }));
    }

    #[test]
    fn test_extension_with_bad_content_is_decode_error() {
        let err = ConfigDocument::from_resolved(resolved("key: value", None, Some("/srv/app.json"))).unwrap_err();
        assert!(matches!(err, LaminateError::Decode { format: Format::Json, .. }));
    }

    #[test]
    fn test_undetectable_names_locator() {
        let err = ConfigDocument::from_resolved(resolved("just some words", None, None)).unwrap_err();
        assert!(matches!(err, LaminateError::FormatUndetectable { ref locator } if locator == "-"));
    }

    #[test]
    fn test_sniffed_format() {
        let doc = ConfigDocument::from_resolved(resolved("[server]\nport = 80", None, None)).unwrap();
        assert_eq!(doc.format(), Format::Toml);
        assert_eq!(doc.locator(), "-");
    }

    #[test]
    fn test_merge_and_encode_in_own_format() {
        let mut base = ConfigDocument::from_tree("base.json", Format::Json, json!({"a": 1}));
        let patch = ConfigDocument::from_tree("patch.yaml", Format::Yaml, json!({"b": 2}));
        base.merge(patch, MergeStrategy::Overwrite).unwrap();

        assert_eq!(base.format(), Format::Json);
        let bytes = base.encode(None).unwrap();
        assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!({"a": 1, "b": 2}));

        let bytes = base.encode(Some(Format::Toml)).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a = 1\nb = 2\n");
    }

    #[test]
    fn test_load_via_resolver() {
        let resolver = SourceResolver::empty().with_stdin(|| Ok(b"name: laminate".to_vec()));
        let doc = ConfigDocument::load(&resolver, "stdin").unwrap();
        assert_eq!(doc.format(), Format::Yaml);
        assert_eq!(doc.into_tree(), json!({"name": "laminate"}));
    }
}
