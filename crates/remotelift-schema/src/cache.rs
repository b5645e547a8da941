//! One-time schema acquisition, safe under concurrent callers

use remotelift_core::{ProxyError, Result};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// The schema pair published by the remote function.
///
/// `None` on either side disables validation for that side; an empty schema
/// object is treated the same way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaPair {
    pub request: Option<Value>,
    pub response: Option<Value>,
}

impl SchemaPair {
    /// Build a pair from the `result` object of a `schema` reply.
    pub fn from_result(result: &Map<String, Value>) -> Self {
        let pair = Self {
            request: side_schema(result.get("request")),
            response: side_schema(result.get("response")),
        };
        if pair.request.is_some() {
            tracing::info!("request schema loaded from the remote function");
        } else {
            tracing::info!("no request schema returned from the remote function");
        }
        if pair.response.is_some() {
            tracing::info!("response schema loaded from the remote function");
        } else {
            tracing::info!("no response schema returned from the remote function");
        }
        pair
    }
}

fn side_schema(value: Option<&Value>) -> Option<Value> {
    match value {
        Some(Value::Object(map)) if !map.is_empty() => Some(Value::Object(map.clone())),
        _ => None,
    }
}

/// Lazily-fetched schema pair shared by every operation issued through one
/// provider configuration.
///
/// The first caller runs the fetch; concurrent callers block until it
/// completes and all of them, including later ones, observe the same outcome.
/// A failed fetch is cached too and replayed as
/// [`ProxyError::SchemaFetch`] for the lifetime of the cache — the fetch is
/// attempted once, never retried.
#[derive(Debug, Default)]
pub struct SchemaCache {
    cell: OnceCell<std::result::Result<Arc<SchemaPair>, String>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached pair, running `fetch` if no attempt has been made.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Arc<SchemaPair>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SchemaPair>>,
    {
        if self.cell.initialized() {
            tracing::debug!("using cached schemas, not fetching again");
        }
        let outcome = self
            .cell
            .get_or_init(|| async {
                match fetch().await {
                    Ok(pair) => Ok(Arc::new(pair)),
                    Err(err) => {
                        tracing::error!("schema fetch failed, caching the failure: {err}");
                        Err(err.to_string())
                    }
                }
            })
            .await;
        match outcome {
            Ok(pair) => Ok(Arc::clone(pair)),
            Err(message) => Err(ProxyError::SchemaFetch(message.clone())),
        }
    }
}
