//! Seed-file loading: one JSON array per entity type.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::PipelineError;

/// Read a seed file and return its raw records.
///
/// The only validation performed here is the top-level shape: anything other
/// than a JSON array is a fatal [`PipelineError::MalformedInput`].
/// Field-level checks are each consuming component's own responsibility.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if the file cannot be read and
/// [`PipelineError::MalformedInput`] if it does not hold a top-level array.
pub async fn load_records(path: &Path) -> Result<Vec<Value>, PipelineError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| PipelineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parsed: Value =
        serde_json::from_slice(&bytes).map_err(|_| PipelineError::MalformedInput {
            source_name: path.display().to_string(),
        })?;

    match parsed {
        Value::Array(records) => {
            debug!(path = %path.display(), records = records.len(), "Loaded seed file");
            Ok(records)
        }
        _ => Err(PipelineError::MalformedInput {
            source_name: path.display().to_string(),
        }),
    }
}
