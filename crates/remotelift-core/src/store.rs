//! Store codec
//!
//! The remote function may hand back an opaque `store` object which the host
//! engine persists verbatim as a string. The store is advisory, never
//! authoritative: a blob that does not decode yields an empty object instead
//! of failing the operation.

use serde_json::{Map, Value};

/// Serialize a store object for persistence. Absent store encodes to an
/// empty string.
pub fn encode(store: Option<&Map<String, Value>>) -> String {
    let Some(map) = store else {
        return String::new();
    };
    serde_json::to_string(map).unwrap_or_default()
}

/// Recover a store object from its persisted form. Empty or malformed input
/// decodes to an empty object.
pub fn decode(serialized: &str) -> Map<String, Value> {
    if serialized.is_empty() {
        return Map::new();
    }
    match serde_json::from_str(serialized) {
        Ok(map) => map,
        Err(err) => {
            tracing::warn!("persisted store did not decode as a JSON object, starting empty: {err}");
            Map::new()
        }
    }
}
