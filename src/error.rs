use thiserror::Error;

use crate::types::DatasetId;

/// Convenience result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Error type shared across ingestion, storage, and report rendering.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Malformed CSV text (ragged rows, unterminated quoting, invalid UTF-8).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The upload does not declare every required column.
    ///
    /// The message always names the full required set, not just the missing
    /// columns, so a caller can correct the file in one pass.
    #[error("schema mismatch: {message}")]
    Schema { message: String },

    /// The upload parsed cleanly but contains no data rows.
    #[error("CSV contains no data rows")]
    EmptyTable,

    /// The referenced dataset does not exist (stale or bogus id).
    #[error("dataset {id} not found")]
    NotFound { id: DatasetId },

    /// A stored raw blob could not be reconstituted into rows at render time.
    ///
    /// This is a data-integrity defect and is always surfaced to the caller.
    #[error("report render error: {message}")]
    Render { message: String },

    /// Store-side failure that cannot be absorbed by the pipeline.
    #[error("store error: {message}")]
    Store { message: String },
}
