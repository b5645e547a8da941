//! Lambda transport error types

use remotelift_core::ProxyError;
use thiserror::Error;

/// Lambda transport errors
#[derive(Error, Debug)]
pub enum LambdaError {
    #[error("no lambda function configured: set REMOTELIFT_LAMBDA or pass a function name")]
    MissingFunction,

    #[error("region is required when the lambda function is not an ARN")]
    MissingRegion,

    #[error("lambda invocation failed: {0}")]
    Invoke(String),

    #[error("lambda returned a function error: {0}")]
    Function(String),

    #[error("failed to decode lambda reply: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<LambdaError> for ProxyError {
    fn from(err: LambdaError) -> Self {
        ProxyError::Invoke(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LambdaError>;
