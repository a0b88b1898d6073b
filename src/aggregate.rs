//! Aggregation of a validated [`RawTable`] into [`DatasetStats`].
//!
//! [`summarize`] is a pure function; identity and creation time are assigned
//! later, at persistence time, by the store.

use std::collections::BTreeMap;

use crate::ingest::schema::{COL_FLOWRATE, COL_PRESSURE, COL_TEMPERATURE, COL_TYPE};
use crate::types::{DatasetStats, RawTable};

/// Compute summary statistics for one table.
///
/// Rules:
///
/// - `total_count` counts every data row, regardless of whether its numeric
///   cells parsed.
/// - Each mean covers only the cells of its column that parse as a finite
///   `f64` after trimming; unparsable, empty, and non-finite cells are
///   skipped without affecting the row count. A column with no usable cells
///   (including the zero-row table) yields 0.0.
/// - The distribution counts rows per distinct `Type` cell value in a single
///   pass. Counts always sum to the row count.
///
/// A zero-row table is valid input here and produces zeroed means and an
/// empty distribution; rejecting empty uploads is the service's concern.
pub fn summarize(table: &RawTable) -> DatasetStats {
    DatasetStats {
        total_count: table.row_count() as u64,
        avg_flowrate: round2(column_mean(table, COL_FLOWRATE)),
        avg_pressure: round2(column_mean(table, COL_PRESSURE)),
        avg_temperature: round2(column_mean(table, COL_TEMPERATURE)),
        type_distribution: type_distribution(table),
    }
}

/// Round to 2 decimal places, half away from zero.
///
/// Deterministic and idempotent: re-rounding a rounded value is a no-op.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn column_mean(table: &RawTable, column: &str) -> f64 {
    let Some(idx) = table.column_index(column) else {
        return 0.0;
    };

    let mut sum = 0.0;
    let mut count = 0u64;
    for row in table.rows() {
        let Some(cell) = row.get(idx) else { continue };
        if let Ok(v) = cell.trim().parse::<f64>() {
            // f64 parsing accepts "NaN"/"inf" spellings; those are excluded
            // like any other non-numeric cell.
            if v.is_finite() {
                sum += v;
                count += 1;
            }
        }
    }

    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn type_distribution(table: &RawTable) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    let Some(idx) = table.column_index(COL_TYPE) else {
        return counts;
    };

    for row in table.rows() {
        if let Some(value) = row.get(idx) {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::{round2, summarize};
    use crate::ingest::parse_csv_text;
    use crate::types::RawTable;

    fn table(text: &str) -> RawTable {
        parse_csv_text(text).unwrap()
    }

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(2.345), 2.35);
        assert_eq!(round2(-2.345), -2.35);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn round2_is_idempotent() {
        for x in [0.005, 1.2349, 19.999, -3.331, 200.0 / 3.0] {
            assert_eq!(round2(round2(x)), round2(x));
        }
    }

    #[test]
    fn means_and_distribution_for_small_table() {
        let t = table(
            "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
             P-101,Pump,10,1,100\n\
             P-102,Pump,20,2,200\n\
             V-201,Valve,30,3,300\n",
        );
        let stats = summarize(&t);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.avg_flowrate, 20.00);
        assert_eq!(stats.avg_pressure, 2.00);
        assert_eq!(stats.avg_temperature, 200.00);
        assert_eq!(stats.type_distribution["Pump"], 2);
        assert_eq!(stats.type_distribution["Valve"], 1);
    }

    #[test]
    fn non_numeric_cells_are_excluded_without_changing_row_count() {
        let t = table(
            "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
             P-101,Pump,10,1,100\n\
             P-102,Pump,n/a,2,NaN\n\
             V-201,Valve,30,,300\n",
        );
        let stats = summarize(&t);
        assert_eq!(stats.total_count, 3);
        // Flowrate: (10 + 30) / 2; "NaN" text and empty cells are skipped.
        assert_eq!(stats.avg_flowrate, 20.00);
        assert_eq!(stats.avg_pressure, 1.50);
        assert_eq!(stats.avg_temperature, 200.00);
    }

    #[test]
    fn zero_rows_does_not_panic() {
        let t = table("Equipment Name,Type,Flowrate,Pressure,Temperature\n");
        let stats = summarize(&t);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.avg_flowrate, 0.0);
        assert_eq!(stats.avg_pressure, 0.0);
        assert_eq!(stats.avg_temperature, 0.0);
        assert!(stats.type_distribution.is_empty());
    }

    #[test]
    fn distribution_counts_sum_to_row_count() {
        let t = table(
            "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
             A,Pump,1,1,1\n\
             B,Valve,2,2,2\n\
             C,Pump,3,3,3\n\
             D,Compressor,4,4,4\n",
        );
        let stats = summarize(&t);
        let total: u64 = stats.type_distribution.values().sum();
        assert_eq!(total, stats.total_count);
    }
}
