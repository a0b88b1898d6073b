//! Core data model types.
//!
//! An upload moves through three shapes: the ephemeral [`RawTable`] produced
//! by parsing, the [`DatasetStats`] computed by aggregation, and the persisted
//! [`Dataset`] (stats + identity + the original CSV text). Stored datasets are
//! immutable; the raw text blob is the source of truth for per-row listings
//! and is re-parsed on every detail/report access.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Opaque identifier of a persisted [`Dataset`].
///
/// The reference store assigns ids from a strictly monotonic counter, so ids
/// double as creation-order tie-breakers when two uploads share a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DatasetId(pub u64);

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The raw parsed rows of one uploaded CSV prior to aggregation.
///
/// Headers and cells are kept verbatim as strings, in file order. Every row
/// has the same width as the header row (the parser rejects ragged input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a table from a header row and row-major cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Column headers in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by exact header name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Iterate rows as cell slices, in file order.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Cell value at `(row, column)`, if both are in range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(|s| s.as_str())
    }

    /// Convert every row to a name -> value map, keeping all columns
    /// (including ones aggregation ignores) verbatim.
    pub fn to_records(&self) -> Vec<BTreeMap<String, String>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

/// Aggregated statistics for one upload, before identity is assigned.
///
/// Produced by [`crate::aggregate::summarize`]; persisted as part of a
/// [`Dataset`] by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    /// Number of data rows in the upload (all rows, regardless of whether
    /// their numeric cells parsed).
    pub total_count: u64,
    /// Mean of the parsable `Flowrate` cells, rounded to 2 decimal places.
    pub avg_flowrate: f64,
    /// Mean of the parsable `Pressure` cells, rounded to 2 decimal places.
    pub avg_pressure: f64,
    /// Mean of the parsable `Temperature` cells, rounded to 2 decimal places.
    pub avg_temperature: f64,
    /// Rows per distinct `Type` value. Counts sum to `total_count`.
    ///
    /// Consumers should treat this as an unordered mapping; the BTreeMap
    /// only pins a stable label-sorted order for deterministic rendering.
    pub type_distribution: BTreeMap<String, u64>,
}

/// A persisted dataset without its raw row data.
///
/// This is the listing payload the boundary layer serializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Store-assigned identity.
    pub id: DatasetId,
    /// Display name (typically the uploaded file name).
    pub name: String,
    /// Creation time, assigned by the store.
    pub uploaded_at: DateTime<Utc>,
    /// Aggregated statistics.
    #[serde(flatten)]
    pub stats: DatasetStats,
}

/// A fully persisted dataset: summary plus the original CSV text.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Identity, name, timestamp, and stats.
    pub summary: DatasetSummary,
    /// The uploaded CSV text, verbatim.
    pub csv_file: String,
}

/// Detail payload: summary plus re-parsed per-row data.
///
/// `csv_data` carries every column of the original upload, including columns
/// aggregation ignored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetDetail {
    /// Identity, name, timestamp, and stats.
    #[serde(flatten)]
    pub summary: DatasetSummary,
    /// One name -> value map per original row, in file order.
    pub csv_data: Vec<BTreeMap<String, String>>,
}
