//! Required-column validation for uploaded tables.

use crate::error::{DatasetError, DatasetResult};

/// Exact header string of the equipment name column.
pub const COL_EQUIPMENT_NAME: &str = "Equipment Name";
/// Exact header string of the categorical equipment type column.
pub const COL_TYPE: &str = "Type";
/// Exact header string of the flowrate column.
pub const COL_FLOWRATE: &str = "Flowrate";
/// Exact header string of the pressure column.
pub const COL_PRESSURE: &str = "Pressure";
/// Exact header string of the temperature column.
pub const COL_TEMPERATURE: &str = "Temperature";

/// Columns every upload must declare, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_EQUIPMENT_NAME,
    COL_TYPE,
    COL_FLOWRATE,
    COL_PRESSURE,
    COL_TEMPERATURE,
];

/// Verify that `headers` declares every required column.
///
/// Rules:
///
/// - Matching is exact (case- and whitespace-sensitive).
/// - Header order does not matter; extra columns are permitted.
/// - On any absence the error names the full required set, not just the
///   missing columns.
///
/// Operates purely on header presence; cell content is never inspected.
pub fn validate_headers(headers: &[String]) -> DatasetResult<()> {
    let all_present = REQUIRED_COLUMNS
        .iter()
        .all(|required| headers.iter().any(|h| h == required));

    if all_present {
        Ok(())
    } else {
        Err(DatasetError::Schema {
            message: format!("CSV must contain columns: {}", REQUIRED_COLUMNS.join(", ")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{REQUIRED_COLUMNS, validate_headers};

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_exact_required_set() {
        assert!(validate_headers(&headers(&REQUIRED_COLUMNS)).is_ok());
    }

    #[test]
    fn accepts_reordered_headers_with_extras() {
        let hs = headers(&[
            "Location",
            "Temperature",
            "Pressure",
            "Flowrate",
            "Type",
            "Equipment Name",
        ]);
        assert!(validate_headers(&hs).is_ok());
    }

    #[test]
    fn rejects_missing_column_naming_full_set() {
        let hs = headers(&["Equipment Name", "Type", "Flowrate", "Temperature"]);
        let err = validate_headers(&hs).unwrap_err();
        let msg = err.to_string();
        for required in REQUIRED_COLUMNS {
            assert!(msg.contains(required), "message should name '{required}'");
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        let hs = headers(&["equipment name", "type", "flowrate", "pressure", "temperature"]);
        assert!(validate_headers(&hs).is_err());
    }
}
