//! AWS Lambda transport
//!
//! Implements [`remotelift_core::RemoteInvoker`] on top of the AWS Lambda
//! invoke API. This crate owns nothing but the wire mechanism: request
//! envelopes go in, raw JSON replies come out, and a function-level error
//! indicator is fatal. Retry and timeout policy stays with the AWS SDK's
//! defaults.

pub mod config;
pub mod error;
pub mod invoker;

// Re-exports
pub use config::LambdaConfig;
pub use error::LambdaError;
pub use invoker::LambdaInvoker;
