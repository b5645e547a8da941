//! Host-facing resource record

use remotelift_core::{InvokeResponse, store};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The persisted shape of one remote resource.
///
/// The host engine's attribute model is flat and string-typed, so `result`
/// values are coerced: strings pass through, everything else is rendered as
/// its JSON text. `store` is the opaque store object in serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub result: BTreeMap<String, String>,
    pub store: String,
}

impl ResourceRecord {
    pub fn from_response(response: &InvokeResponse) -> Self {
        Self {
            id: response.id.clone(),
            result: coerce_attributes(&response.result),
            store: store::encode(response.store.as_ref()),
        }
    }
}

/// Flatten a result object into the host's string-valued attribute map.
pub fn coerce_attributes(result: &Map<String, Value>) -> BTreeMap<String, String> {
    result
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_pass_through_unquoted() {
        let mut result = Map::new();
        result.insert("name".to_string(), json!("server-1"));
        let attributes = coerce_attributes(&result);
        assert_eq!(attributes.get("name").unwrap(), "server-1");
    }

    #[test]
    fn non_strings_render_as_json_text() {
        let mut result = Map::new();
        result.insert("count".to_string(), json!(3));
        result.insert("ready".to_string(), json!(true));
        result.insert("tags".to_string(), json!(["a", "b"]));
        result.insert("meta".to_string(), json!({"zone": "eu"}));

        let attributes = coerce_attributes(&result);
        assert_eq!(attributes.get("count").unwrap(), "3");
        assert_eq!(attributes.get("ready").unwrap(), "true");
        assert_eq!(attributes.get("tags").unwrap(), r#"["a","b"]"#);
        assert_eq!(attributes.get("meta").unwrap(), r#"{"zone":"eu"}"#);
    }
}
