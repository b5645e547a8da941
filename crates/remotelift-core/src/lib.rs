//! remotelift core types
//!
//! This crate carries everything both sides of the proxy agree on: the
//! request/response envelopes exchanged with the remote function, the
//! [`RemoteInvoker`] trait that hides the wire mechanism, the argument
//! merger that folds the host engine's fragment list into one JSON object,
//! and the codec for the opaque `store` blob carried between operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  host engine                     │
//! │        (plan / create / read / update / delete)  │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │              remotelift-engine                   │
//! │   LifecycleProxy — orchestration per operation   │
//! └───────┬─────────────────────────┬───────────────┘
//!         │                         │
//! ┌───────▼───────┐         ┌───────▼───────┐
//! │ remotelift-   │         │ remotelift-   │
//! │    schema     │         │    lambda     │
//! │ cache + check │         │ RemoteInvoker │
//! └───────────────┘         └───────────────┘
//! ```

pub mod args;
pub mod envelope;
pub mod error;
pub mod invoker;
pub mod store;

// Re-exports
pub use args::{deep_merge, merge_args};
pub use envelope::{Action, InvokeRequest, InvokeResponse};
pub use error::{ProxyError, Result, SchemaSide};
pub use invoker::RemoteInvoker;
