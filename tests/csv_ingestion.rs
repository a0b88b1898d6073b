use equipment_datasets::error::DatasetError;
use equipment_datasets::ingest::{REQUIRED_COLUMNS, ingest_csv};

const FIXTURE: &str = include_str!("fixtures/equipment.csv");

#[test]
fn ingest_fixture_happy_path() {
    let table = ingest_csv(FIXTURE).unwrap();

    assert_eq!(table.row_count(), 5);
    for required in REQUIRED_COLUMNS {
        assert!(table.column_index(required).is_some());
    }
    assert_eq!(table.cell(0, 0), Some("Feed Pump A"));
    assert_eq!(table.cell(4, 1), Some("Compressor"));
}

#[test]
fn ingest_allows_reordered_columns_and_extras() {
    let input = "Temperature,Pressure,Flowrate,Type,Equipment Name,Location\n\
                 65,4.2,120.5,Pump,Feed Pump A,Basement\n";
    let table = ingest_csv(input).unwrap();

    assert_eq!(table.row_count(), 1);
    assert_eq!(table.column_index("Equipment Name"), Some(4));
    assert_eq!(table.column_index("Location"), Some(5));
}

#[test]
fn ingest_errors_on_missing_required_column() {
    let input = "Equipment Name,Type,Flowrate,Temperature\n\
                 Feed Pump A,Pump,120.5,65\n";
    let err = ingest_csv(input).unwrap_err();

    assert!(matches!(err, DatasetError::Schema { .. }));
    let msg = err.to_string();
    for required in REQUIRED_COLUMNS {
        assert!(msg.contains(required), "message should name '{required}'");
    }
}

#[test]
fn ingest_errors_on_ragged_row() {
    let input = "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
                 Feed Pump A,Pump,120.5\n";
    let err = ingest_csv(input).unwrap_err();
    assert!(matches!(err, DatasetError::Csv(_)));
}
