//! CSV parsing into an in-memory [`RawTable`].

use crate::error::DatasetResult;
use crate::types::RawTable;

/// Parse CSV text into a [`RawTable`].
///
/// Rules:
///
/// - The first record is the header row.
/// - Every data row must have the same width as the header row; ragged rows
///   are a parse error.
/// - Cells are kept verbatim as strings. No type coercion happens here;
///   numeric interpretation is the aggregator's concern.
pub fn parse_csv_text(text: &str) -> DatasetResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::parse_csv_text;

    #[test]
    fn parses_headers_and_rows_verbatim() {
        let table = parse_csv_text("Equipment Name,Type\nP-101,Pump\nV-201,Valve\n").unwrap();
        assert_eq!(table.headers(), ["Equipment Name", "Type"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 0), Some("V-201"));
    }

    #[test]
    fn header_only_input_yields_zero_rows() {
        let table = parse_csv_text("Equipment Name,Type\n").unwrap();
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn quoted_cells_may_contain_commas() {
        let table = parse_csv_text("Name,Note\nP-101,\"10, maybe 12\"\n").unwrap();
        assert_eq!(table.cell(0, 1), Some("10, maybe 12"));
    }

    #[test]
    fn ragged_row_is_a_parse_error() {
        let err = parse_csv_text("Name,Type\nP-101\n").unwrap_err();
        assert!(err.to_string().contains("csv error"));
    }
}
