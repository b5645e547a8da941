//! Remote invoker trait definition

use crate::envelope::InvokeRequest;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The wire boundary of the proxy.
///
/// Implementations perform the actual call to the remote function and return
/// its raw JSON reply. A transport failure or a function-level error
/// indicator must surface as [`ProxyError::Invoke`](crate::ProxyError::Invoke);
/// no partial reply is trusted. Retry and timeout policy, if any, belongs to
/// the implementation — the lifecycle core never retries.
#[async_trait]
pub trait RemoteInvoker: Send + Sync {
    /// Invoke the remote function with the given request envelope.
    async fn invoke(&self, request: &InvokeRequest) -> Result<Value>;
}
