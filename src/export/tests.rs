use super::*;
use crate::analysis::NamedSeries;
use crate::metadata::{RunMetadata, HISTORY_COLUMNS};
use std::io::Cursor;
use tempfile::tempdir;

fn ragged() -> Vec<NamedSeries> {
    vec![
        NamedSeries::new("a", vec![1.5, 2.0, 3.25]),
        NamedSeries::new("b", vec![7.0]),
    ]
}

#[test]
fn test_grid_shape_and_padding() {
    let grid = TableExporter::default().grid(&ragged());

    assert_eq!(grid.len(), 4);
    assert!(grid.iter().all(|row| row.len() == 2));
    assert_eq!(grid[0], ["a", "b"]);
    assert_eq!(grid[1], ["1.5", "7.0"]);
    assert_eq!(grid[2], ["2.0", PAD_ZERO]);
    assert_eq!(grid[3][1], PAD_ZERO);
}

#[test]
fn test_real_zero_differs_from_padding() {
    let series = vec![
        NamedSeries::new("a", vec![0.0, 5.0]),
        NamedSeries::new("b", vec![0.0]),
    ];
    let grid = TableExporter::new(PadPolicy::Zero).grid(&series);

    assert_eq!(grid[1], ["0.0", "0.0"]);
    assert_eq!(grid[2], ["5.0", PAD_ZERO]);
    assert_ne!(grid[1][1], grid[2][1]);
}

#[test]
fn test_grid_empty_padding() {
    let grid = TableExporter::new(PadPolicy::Empty).grid(&ragged());
    assert_eq!(grid[3], ["3.25", ""]);
}

#[test]
fn test_grid_all_empty_series() {
    let series = vec![NamedSeries::new("x", vec![]), NamedSeries::new("y", vec![])];
    let grid = TableExporter::default().grid(&series);
    assert_eq!(grid, vec![vec!["x".to_string(), "y".to_string()]]);
}

#[test]
fn test_write_csv() {
    let mut buffer = Vec::new();
    let rows = TableExporter::default()
        .write_csv(&ragged(), Cursor::new(&mut buffer))
        .unwrap();

    assert_eq!(rows, 4);
    assert_eq!(String::from_utf8(buffer).unwrap(), "a,b\n1.5,7.0\n2.0,0\n3.25,0\n");
}

#[test]
fn test_write_csv_rejects_empty() {
    let result = TableExporter::default().write_csv(&[], Vec::new());
    assert!(matches!(result, Err(ExportError::EmptyTable)));
}

#[test]
fn test_history_header_written_once() {
    let dir = tempdir().unwrap();
    let log = HistoryLog::in_dir(dir.path());

    let first = RunMetadata::new("t1").with_capacity_results(Some(100.0), Some(0.25));
    let second = RunMetadata::new("t2").with_internal_resistance(1.5);
    log.append(&first).unwrap();
    log.append(&second).unwrap();

    let content = std::fs::read_to_string(log.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HISTORY_COLUMNS.join(","));

    let rows = log.read_rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "t1");
    assert_eq!(rows[0][3], "100.0");
    assert_eq!(rows[0][4], "");
    assert_eq!(rows[1][4], "1.5");
}

#[test]
fn test_readback_oxidation() {
    let exported = "1_Charge_mAh/g,1_Charge_V,1_Discharge_mAh/g,1_Discharge_V\n\
                    10,3.0,20,2.9\n\
                    30,3.1,40,2.8\n\
                    ,3.2,,\n";
    let table = ExportedTable::from_reader(exported.as_bytes()).unwrap();

    assert_eq!(table.column_peak(0), Some(30.0));
    assert_eq!(table.column_peak(2), Some(40.0));
    assert_eq!(table.oxidation_degree(), Some(0.25));
}

#[test]
fn test_readback_zero_discharge_not_computable() {
    let table = ExportedTable::from_reader("a,b,c\n1,2,0\n".as_bytes()).unwrap();
    assert_eq!(table.oxidation_degree(), None);

    let narrow = ExportedTable::from_reader("a\n1\n".as_bytes()).unwrap();
    assert_eq!(narrow.oxidation_degree(), None);
}
