//! Layered merge engine
//!
//! A patch tree is merged onto a destination tree key by key. Every entry of
//! the patch is classified into one [`Action`]:
//!
//! - the value is the tombstone string `__TOMBSTONE__`: the key is deleted
//! - both sides are mappings: the merge descends into them
//! - both sides are lists under [`MergeStrategy::Preserve`]: the patch list is
//!   appended to the destination list
//! - anything else: the patch value replaces the destination value
//!
//! Keys of the destination that the patch does not mention are left alone.

use laminate_core::error::LaminateError;
use laminate_core::types::{MergeStrategy, TOMBSTONE};
use serde_json::{Map, Value};
use tracing::trace;

use crate::ConfigResult;


/// What a single patch entry does to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Delete,
    Descend,
    Append,
    Replace,
}

impl Action {
    fn classify(existing: Option<&Value>, incoming: &Value, strategy: MergeStrategy) -> Self {
        match (existing, incoming) {
            (_, Value::String(s)) if s == TOMBSTONE => Action::Delete,
            (Some(Value::Object(_)), Value::Object(_)) => Action::Descend,
            (Some(Value::Array(_)), Value::Array(_)) if strategy == MergeStrategy::Preserve => Action::Append,
            _ => Action::Replace,
        }
    }
}

/// Merge `src` onto `dest` in place.
///
/// Both roots must be mappings; anything else fails with
/// [`LaminateError::TypeMismatch`] and leaves `dest` untouched.
pub fn merge(dest: &mut Value, src: Value, strategy: MergeStrategy) -> ConfigResult<()> {
    let src = match src {
        Value::Object(map) => map,
        other => return Err(mismatch(&other)),
    };
    let dest = match dest {
        Value::Object(map) => map,
        other => return Err(mismatch(other)),
    };

    merge_maps(dest, src, strategy);
    Ok(())
}

/// Merge with a strategy given by name; the name is validated before `dest` is touched
pub fn merge_named(dest: &mut Value, src: Value, strategy: &str) -> ConfigResult<()> {
    let strategy: MergeStrategy = strategy.parse()?;
    merge(dest, src, strategy)
}

fn merge_maps(dest: &mut Map<String, Value>, src: Map<String, Value>, strategy: MergeStrategy) {
    for (key, incoming) in src {
        let action = Action::classify(dest.get(&key), &incoming, strategy);
        trace!("{:?} '{}'", action, key);

        match action {
            Action::Delete => {
                dest.shift_remove(&key);
            },
            Action::Descend => {
                if let (Some(Value::Object(existing)), Value::Object(patch)) = (dest.get_mut(&key), incoming) {
                    merge_maps(existing, patch, strategy);
                }
            },
            Action::Append => {
                if let (Some(Value::Array(existing)), Value::Array(patch)) = (dest.get_mut(&key), incoming) {
                    existing.extend(patch);
                }
            },
            Action::Replace => {
                dest.insert(key, incoming);
            },
        }
    }
}

fn mismatch(found: &Value) -> LaminateError {
    LaminateError::TypeMismatch {
        expected: "mapping".to_string(),
        found: kind(found).to_string(),
    }
}

/// Human name of a tree node's type
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
