//! Shared error types for the lifecycle proxy

use crate::envelope::Action;
use thiserror::Error;

/// Which side of the remote contract a schema applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSide {
    /// The merged arguments sent to the remote function.
    Request,
    /// The `result` object returned by the remote function.
    Response,
}

impl std::fmt::Display for SchemaSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaSide::Request => write!(f, "request"),
            SchemaSide::Response => write!(f, "response"),
        }
    }
}

/// Lifecycle proxy errors
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("failed to parse arguments: {0}")]
    Parse(String),

    #[error("schema fetch failed: {0}")]
    SchemaFetch(String),

    #[error("{side} failed schema validation:\n- {}", .violations.join("\n- "))]
    Validation {
        side: SchemaSide,
        violations: Vec<String>,
    },

    #[error("remote invocation failed: {0}")]
    Invoke(String),

    #[error("contract violation: {0}")]
    Contract(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{action}: {source}")]
    Operation {
        action: Action,
        #[source]
        source: Box<ProxyError>,
    },
}

impl ProxyError {
    /// Label an error with the lifecycle action it occurred under.
    ///
    /// Already-labeled errors pass through unchanged so nested calls do not
    /// stack prefixes.
    pub fn for_action(self, action: Action) -> Self {
        match self {
            ProxyError::Operation { .. } => self,
            other => ProxyError::Operation {
                action,
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
