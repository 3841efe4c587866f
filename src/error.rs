use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Error type returned by the import pipeline.
///
/// Only fatal conditions live here. Per-row data problems are reported as
/// [`crate::types::Issue`]s and never abort a run.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Underlying I/O error (e.g. input file not found, output directory not writable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The locations CSV has no header row.
    #[error("locations CSV is empty: {}", path.display())]
    EmptyInput { path: PathBuf },

    /// Serializing the destination records failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The finished output could not be moved into place.
    #[error("failed to persist output: {0}")]
    Persist(#[from] tempfile::PersistError),
}
