//! Request and response envelopes for the remote function

use crate::error::{ProxyError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Action requested from the remote function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new resource
    Create,
    /// Refresh a resource from its remote truth
    Read,
    /// Update an existing resource in place
    Update,
    /// Delete a resource
    Delete,
    /// Ask whether the proposed arguments force a replacement
    Diff,
    /// Fetch the request/response schema pair
    Schema,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Read => write!(f, "read"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
            Action::Diff => write!(f, "diff"),
            Action::Schema => write!(f, "schema"),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Payload sent to the remote function.
///
/// `state` carries the previous merged arguments, `store` the opaque object
/// the remote function handed back on the last operation. Both are omitted
/// from the wire form when absent, as is `planning` when false.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeRequest {
    pub action: Action,
    pub args: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "is_false")]
    pub planning: bool,
}

impl InvokeRequest {
    pub fn new(action: Action, args: Map<String, Value>) -> Self {
        Self {
            action,
            args,
            state: None,
            store: None,
            planning: false,
        }
    }

    pub fn with_state(mut self, state: Map<String, Value>) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_store(mut self, store: Map<String, Value>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_planning(mut self, planning: bool) -> Self {
        self.planning = planning;
        self
    }
}

/// Decoded reply from the remote function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvokeResponse {
    /// Remote resource identifier, read from `result.id`. Empty when the
    /// remote function did not report one.
    pub id: String,
    /// The `result` object; empty when absent or undecodable.
    pub result: Map<String, Value>,
    /// The opaque store object to persist, if any.
    pub store: Option<Map<String, Value>>,
    /// Whether the remote function requests a destroy-and-recreate.
    pub replace: bool,
    /// Operator-visible reason accompanying a replacement request.
    pub reason: String,
}

impl InvokeResponse {
    /// Decode a raw reply payload.
    ///
    /// The top level must be a JSON object; everything below it is decoded
    /// leniently. `result` and `store` may arrive either as objects or as
    /// JSON-encoded strings (some runtimes double-encode their output), and
    /// anything undecodable degrades to an empty object rather than failing
    /// the operation.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let top = payload.as_object().ok_or_else(|| {
            ProxyError::Invoke(format!("reply is not a JSON object: {payload}"))
        })?;

        let result = lenient_object(top.get("result"), "result").unwrap_or_default();

        let store = match top.get("store") {
            None | Some(Value::Null) => None,
            Some(value) => lenient_object(Some(value), "store"),
        };

        let id = result
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let replace = top.get("replace").and_then(Value::as_bool).unwrap_or(false);
        let reason = top
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            id,
            result,
            store,
            replace,
            reason,
        })
    }
}

/// Decode a field that may be an object, a JSON-encoded string, or garbage.
fn lenient_object(value: Option<&Value>, field: &str) -> Option<Map<String, Value>> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map.clone()),
        Some(Value::String(text)) => match serde_json::from_str::<Map<String, Value>>(text) {
            Ok(map) => Some(map),
            Err(err) => {
                tracing::warn!("could not decode stringified '{field}' field: {err}");
                None
            }
        },
        Some(other) => {
            tracing::warn!("unexpected type for '{field}' field: {other}");
            Some(Map::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_absent_fields() {
        let request = InvokeRequest::new(Action::Create, Map::new());
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire, json!({"action": "create", "args": {}}));
    }

    #[test]
    fn request_carries_state_store_and_planning() {
        let mut state = Map::new();
        state.insert("name".to_string(), json!("old"));
        let request = InvokeRequest::new(Action::Update, Map::new())
            .with_state(state)
            .with_store(Map::new())
            .with_planning(true);
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(
            wire,
            json!({
                "action": "update",
                "args": {},
                "state": {"name": "old"},
                "store": {},
                "planning": true
            })
        );
    }

    #[test]
    fn response_reads_id_from_result() {
        let response = InvokeResponse::from_payload(&json!({
            "result": {"id": "r-42", "name": "thing"},
            "store": {"token": "abc"},
            "replace": true,
            "reason": "type changed"
        }))
        .unwrap();
        assert_eq!(response.id, "r-42");
        assert_eq!(response.result.get("name"), Some(&json!("thing")));
        assert!(response.replace);
        assert_eq!(response.reason, "type changed");
    }

    #[test]
    fn response_decodes_stringified_result_and_store() {
        let response = InvokeResponse::from_payload(&json!({
            "result": "{\"id\": \"r-1\"}",
            "store": "{\"cursor\": 7}"
        }))
        .unwrap();
        assert_eq!(response.id, "r-1");
        assert_eq!(
            response.store.unwrap().get("cursor"),
            Some(&json!(7))
        );
    }

    #[test]
    fn undecodable_result_degrades_to_empty() {
        let response = InvokeResponse::from_payload(&json!({
            "result": "not json at all"
        }))
        .unwrap();
        assert!(response.id.is_empty());
        assert!(response.result.is_empty());
        assert!(response.store.is_none());
    }

    #[test]
    fn non_object_reply_is_fatal() {
        let err = InvokeResponse::from_payload(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ProxyError::Invoke(_)));
    }
}
