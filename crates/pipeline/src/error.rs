//! Error taxonomy for the seed and flush pipelines.
//!
//! Propagation policy: validation errors are never retried - they indicate
//! bad seed input that must be fixed upstream. Store errors propagate and
//! halt the running orchestrator; retry policy, if any, belongs to the store
//! binding. There is no cross-chunk rollback, so already-committed chunks
//! and already-processed collections stay committed on failure.

use std::path::PathBuf;

use clover_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the seed and flush pipelines.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A seed input's top-level structure is not a JSON array. Fatal for the
    /// whole run.
    #[error("{source_name}: expected a top-level JSON array")]
    MalformedInput { source_name: String },

    /// A single record could not be decoded into the expected input shape.
    #[error("{context}: malformed record: {source}")]
    MalformedRecord {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record is missing a field the pipeline requires. Absent and null
    /// are both "missing"; this is distinct from a present-but-invalid
    /// value.
    #[error("{context}: missing required field `{field}`")]
    MissingRequiredField { context: String, field: String },

    /// An order references a sku or user that does not exist in the
    /// corresponding reference index.
    #[error("order `{order_id}`: unknown {kind} `{key}`")]
    UnknownReference {
        order_id: String,
        kind: RefKind,
        key: String,
    },

    /// A field is present but its value is out of range (negative price or
    /// inventory, non-positive resolved unit price, empty item list, ...).
    #[error("{context}: invalid `{field}`: {reason}")]
    InvalidValue {
        context: String,
        field: String,
        reason: String,
    },

    /// The store rejected or failed a commit, fetch, or delete.
    #[error("store operation failed for collection `{collection}`")]
    StoreCommit {
        collection: String,
        #[source]
        source: StoreError,
    },

    /// A seed input file could not be read.
    #[error("failed to read seed file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entity could not be serialized into a store document.
    #[error("document serialization failed")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub(crate) fn missing(context: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            context: context.into(),
            field: field.into(),
        }
    }

    pub(crate) fn invalid(
        context: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            context: context.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn store(collection: &str, source: StoreError) -> Self {
        Self::StoreCommit {
            collection: collection.to_string(),
            source,
        }
    }
}

/// What kind of reference an order failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Sku,
    User,
}

impl std::fmt::Display for RefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sku => write!(f, "sku"),
            Self::User => write!(f, "user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = PipelineError::UnknownReference {
            order_id: "O1".to_string(),
            kind: RefKind::Sku,
            key: "GHOST".to_string(),
        };
        assert_eq!(err.to_string(), "order `O1`: unknown sku `GHOST`");

        let err = PipelineError::missing("products record 2", "inventory");
        assert_eq!(
            err.to_string(),
            "products record 2: missing required field `inventory`"
        );
    }
}
