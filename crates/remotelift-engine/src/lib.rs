//! Lifecycle orchestration
//!
//! [`LifecycleProxy`] sequences one resource operation end to end: merge the
//! argument fragments, acquire the (cached) schema pair, validate the request,
//! invoke the remote function, interpret the reply, and decide what mutates
//! the host engine's persisted record. The planning-time replacement check
//! lives beside it in [`diff`].
//!
//! Per-operation state is local; the only thing operations share is the
//! schema cache inside the proxy, so the host engine may run any number of
//! operations against one proxy in parallel.

pub mod diff;
pub mod lifecycle;
pub mod planning;
pub mod record;

// Re-exports
pub use diff::ReplaceDecision;
pub use lifecycle::{LifecycleProxy, ResourceInput};
pub use planning::planning_enabled;
pub use record::ResourceRecord;
