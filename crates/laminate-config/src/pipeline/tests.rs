//! Tests for the layering run

use super::*;
use laminate_core::error::LaminateError;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn resolver() -> SourceResolver {
    SourceResolver::empty().with_backend(
        laminate_source::Scheme::File,
        laminate_source::backend::FileBackend::new(),
    )
}

fn run(request: &LayerRequest) -> ConfigResult<LayerOutput> {
    let resolver = resolver();
    Pipeline::new(&resolver).run(request)
}

fn as_json(output: &LayerOutput) -> Value {
    serde_json::from_slice(&output.bytes).unwrap()
}

#[test]
fn test_overwrite_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.yaml", "server:\n  host: a\n  port: 80\n");
    let patch = write(&dir, "patch.json", r#"{"server": {"port": 9090}}"#);

    let request = LayerRequest::new(&base)
        .with_patches([&patch])
        .with_output_format("json");
    let output = run(&request).unwrap();

    assert_eq!(output.format, Format::Json);
    assert_eq!(as_json(&output), json!({"server": {"host": "a", "port": 9090}}));
}

#[test]
fn test_plugin_scenario_per_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.json", r#"{"server": {"plugins": [{"name": "auth"}]}}"#);
    let patch = write(&dir, "patch.json", r#"{"server": {"plugins": [{"name": "cache"}]}}"#);

    let preserve = LayerRequest::new(&base)
        .with_patches([&patch])
        .with_merge_strategy("preserve");
    assert_eq!(
        as_json(&run(&preserve).unwrap()),
        json!({"server": {"plugins": [{"name": "auth"}, {"name": "cache"}]}})
    );

    let overwrite = preserve.with_merge_strategy("overwrite");
    assert_eq!(
        as_json(&run(&overwrite).unwrap()),
        json!({"server": {"plugins": [{"name": "cache"}]}})
    );
}

#[test]
fn test_output_defaults_to_base_format() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.toml", "name = \"laminate\"\n");
    let patch = write(&dir, "patch.yaml", "version: 2\n");

    let output = run(&LayerRequest::new(&base).with_patches([&patch])).unwrap();
    assert_eq!(output.format, Format::Toml);
    assert_eq!(String::from_utf8(output.bytes).unwrap(), "name = \"laminate\"\nversion = 2\n");
}

#[test]
fn test_yml_output_alias() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.json", r#"{"a": 1}"#);

    let output = run(&LayerRequest::new(&base).with_output_format("yml")).unwrap();
    assert_eq!(output.format, Format::Yaml);
}

#[test]
fn test_later_patch_removes_earlier_key() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.json", r#"{"a": 1}"#);
    let first = write(&dir, "first.json", r#"{"b": 2}"#);
    let second = write(&dir, "second.yaml", "b: __TOMBSTONE__\n");

    let output = run(&LayerRequest::new(&base).with_patches([&first, &second])).unwrap();
    assert_eq!(as_json(&output), json!({"a": 1}));
}

#[test]
fn test_invalid_strategy_fails_before_fetch() {
    let touched = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&touched);
    let resolver = SourceResolver::empty().with_stdin(move || {
        flag.store(true, Ordering::SeqCst);
        Ok(b"a: 1".to_vec())
    });

    let request = LayerRequest::new("-").with_merge_strategy("append");
    let err = Pipeline::new(&resolver).run(&request).unwrap_err();

    assert!(matches!(err, LaminateError::InvalidMergeStrategy { .. }));
    assert!(!touched.load(Ordering::SeqCst));
}

#[test]
fn test_invalid_output_format_fails_before_fetch() {
    let err = run(&LayerRequest::new("/nonexistent/base.json").with_output_format("xml")).unwrap_err();
    assert!(matches!(err, LaminateError::UnsupportedFormat { ref format } if format == "xml"));
}

#[test]
fn test_missing_patch_names_stage_and_locator() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.json", r#"{"a": 1}"#);
    let missing = dir.path().join("missing.json");
    let missing = missing.to_str().unwrap();

    let err = run(&LayerRequest::new(&base).with_patches([missing])).unwrap_err();
    match &err {
        LaminateError::Stage { stage, locator, source } => {
            assert_eq!(*stage, Stage::LoadPatch);
            assert_eq!(locator, missing);
            assert!(matches!(**source, LaminateError::BackendFetch { .. }));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_non_mapping_patch_is_apply_error() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.json", r#"{"a": 1}"#);
    let patch = write(&dir, "patch.json", "[1, 2]");

    let err = run(&LayerRequest::new(&base).with_patches([&patch])).unwrap_err();
    assert!(matches!(err, LaminateError::Stage { stage: Stage::ApplyPatch, .. }));
    assert!(matches!(err.root(), LaminateError::TypeMismatch { .. }));
}

#[test]
fn test_empty_output_is_encode_error() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.toml", "a = 1\n");
    let patch = write(&dir, "patch.toml", "a = \"__TOMBSTONE__\"\n");

    let err = run(&LayerRequest::new(&base).with_patches([&patch])).unwrap_err();
    assert!(matches!(err, LaminateError::Stage { stage: Stage::EncodeOutput, .. }));
    assert!(matches!(err.root(), LaminateError::EmptyOutput { format: Format::Toml }));
}

#[test]
fn test_undetectable_stdin_source() {
    let resolver = SourceResolver::empty().with_stdin(|| Ok(b"plain text".to_vec()));
    let err = Pipeline::new(&resolver).run(&LayerRequest::new("-")).unwrap_err();
    assert!(matches!(err, LaminateError::Stage { stage: Stage::LoadSource, .. }));
    assert!(matches!(err.root(), LaminateError::FormatUndetectable { .. }));
}

#[test]
fn test_stdin_patch_with_hinted_file() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.conf", "a: 1\n");
    let base_uri = format!("file+yaml://{}", Path::new(&base).display());
    let resolver = resolver().with_stdin(|| Ok(br#"{"b": true}"#.to_vec()));

    let request = LayerRequest::new(base_uri).with_patches(["-"]).with_output_format("json");
    let output = Pipeline::new(&resolver).run(&request).unwrap();
    assert_eq!(as_json(&output), json!({"a": 1, "b": true}));
}

#[test]
fn test_comment_only_yaml_base_accepts_patches() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.yaml", "# nothing configured yet\n");
    let patch = write(&dir, "patch.yaml", "server:\n  port: 9090\n");

    let request = LayerRequest::new(&base)
        .with_patches([&patch])
        .with_output_format("json");
    let output = run(&request).unwrap();
    assert_eq!(as_json(&output), json!({"server": {"port": 9090}}));
}

#[test]
fn test_empty_yaml_patch_is_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(&dir, "base.json", r#"{"server": {"port": 80}}"#);
    let patch = write(&dir, "patch.yaml", "");

    let output = run(&LayerRequest::new(&base).with_patches([&patch])).unwrap();
    assert_eq!(as_json(&output), json!({"server": {"port": 80}}));
}

#[test]
fn test_yaml_merge_keys_reach_output() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(
        &dir,
        "base.yaml",
        "defaults: &defaults\n  timeout: 30\nservice:\n  <<: *defaults\n  name: api\n",
    );

    let output = run(&LayerRequest::new(&base).with_output_format("json")).unwrap();
    assert_eq!(
        as_json(&output),
        json!({"defaults": {"timeout": 30}, "service": {"timeout": 30, "name": "api"}})
    );
}
