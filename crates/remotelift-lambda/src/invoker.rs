//! Lambda-backed remote invoker

use crate::config::LambdaConfig;
use crate::error::{LambdaError, Result};
use async_trait::async_trait;
use aws_sdk_lambda::primitives::Blob;
use remotelift_core::{InvokeRequest, RemoteInvoker};
use serde_json::Value;

/// Remote invoker backed by a single AWS Lambda function.
pub struct LambdaInvoker {
    client: aws_sdk_lambda::Client,
    function: String,
}

impl LambdaInvoker {
    /// Build an invoker from a validated configuration, loading AWS
    /// credentials from the ambient environment.
    pub async fn connect(config: LambdaConfig) -> Result<Self> {
        let config = config.validated()?;
        let mut loader = aws_config::from_env();
        if let Some(region) = config.region.clone() {
            loader = loader.region(aws_config::Region::new(region));
        }
        let sdk_config = loader.load().await;
        Ok(Self {
            client: aws_sdk_lambda::Client::new(&sdk_config),
            function: config.function,
        })
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    async fn call(&self, request: &InvokeRequest) -> Result<Value> {
        let payload = serde_json::to_vec(request)?;
        tracing::debug!(
            "invoking lambda {} with action {}",
            self.function,
            request.action
        );

        let output = self
            .client
            .invoke()
            .function_name(&self.function)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|err| LambdaError::Invoke(err.to_string()))?;

        let reply = output
            .payload()
            .map(|blob| blob.as_ref().to_vec())
            .unwrap_or_default();

        if let Some(kind) = output.function_error() {
            let body = String::from_utf8_lossy(&reply);
            tracing::error!("lambda {} returned a function error: {body}", self.function);
            return Err(LambdaError::Function(format!("{kind}: {body}")));
        }
        if reply.is_empty() {
            return Err(LambdaError::Invoke("empty reply payload".to_string()));
        }

        tracing::debug!("lambda reply: {}", String::from_utf8_lossy(&reply));
        Ok(serde_json::from_slice(&reply)?)
    }
}

#[async_trait]
impl RemoteInvoker for LambdaInvoker {
    async fn invoke(&self, request: &InvokeRequest) -> remotelift_core::Result<Value> {
        self.call(request).await.map_err(Into::into)
    }
}
