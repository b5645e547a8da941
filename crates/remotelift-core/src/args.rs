//! Argument merging
//!
//! The host engine supplies resource arguments as an ordered list of
//! JSON-object-encoded strings. Later fragments win: object values merge
//! recursively, everything else is replaced. A single string (the legacy
//! form) and an already-merged object (arguments recovered from persisted
//! state) are also accepted.

use crate::error::{ProxyError, Result};
use serde_json::{Map, Value};

/// Merge an argument input into one JSON object.
///
/// A fragment inside an array that is not a string, or that does not parse
/// as a JSON object, is skipped with a diagnostic. A legacy single-string
/// input that does not parse is fatal.
pub fn merge_args(input: &Value) -> Result<Map<String, Value>> {
    match input {
        Value::Array(fragments) => {
            let mut merged = Map::new();
            for (index, fragment) in fragments.iter().enumerate() {
                let Some(text) = fragment.as_str() else {
                    tracing::warn!("args fragment {index} is not a string, skipping: {fragment}");
                    continue;
                };
                match serde_json::from_str::<Map<String, Value>>(text) {
                    Ok(parsed) => deep_merge(&mut merged, parsed),
                    Err(err) => {
                        tracing::warn!("failed to parse args fragment {index}, skipping: {err}\ninput: {text}");
                    }
                }
            }
            Ok(merged)
        }
        Value::String(text) => serde_json::from_str::<Map<String, Value>>(text).map_err(|err| {
            ProxyError::Parse(format!(
                "failed to parse args as a JSON object: {err}\ninput was:\n{text}"
            ))
        }),
        Value::Object(map) => Ok(map.clone()),
        other => Err(ProxyError::Parse(format!(
            "args must be a string, an array of strings, or an object (got {other})"
        ))),
    }
}

/// Merge `src` into `dst`, recursing where both sides hold objects.
pub fn deep_merge(dst: &mut Map<String, Value>, src: Map<String, Value>) {
    for (key, value) in src {
        match (dst.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, value) => {
                dst.insert(key, value);
            }
        }
    }
}
