//! Ingestion entrypoints.
//!
//! Most callers should use [`ingest_csv`], which parses CSV text and
//! validates the header set in one step. The pieces are also available
//! separately:
//!
//! - [`csv`]: CSV text -> [`crate::types::RawTable`]
//! - [`schema`]: required-column validation

pub mod csv;
pub mod schema;

pub use csv::parse_csv_text;
pub use schema::{REQUIRED_COLUMNS, validate_headers};

use crate::error::DatasetResult;
use crate::types::RawTable;

/// Parse CSV text and verify it declares every required column.
///
/// Fails with a parse error on malformed text and a schema error when any
/// required column is absent. Nothing is persisted on failure.
pub fn ingest_csv(text: &str) -> DatasetResult<RawTable> {
    let table = csv::parse_csv_text(text)?;
    schema::validate_headers(table.headers())?;
    Ok(table)
}
