//! Schema acquisition and validation
//!
//! The remote function may publish a `{request, response}` JSON-Schema pair
//! through its `schema` action. The pair is fetched once per
//! provider-configuration lifetime — under concurrent callers exactly one
//! fetch runs and everyone observes its outcome — and each lifecycle
//! operation validates its merged arguments (and, except on delete, the
//! remote reply) against it.

pub mod cache;
pub mod validate;

// Re-exports
pub use cache::{SchemaCache, SchemaPair};
pub use validate::validate;
