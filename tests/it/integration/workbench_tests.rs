//! Workbench flows: submit, list history, regenerate.

use crate::helpers::{axes, memory_bench, sales_db, xy_csv};
use tabplot::data::{DataError, FileManager};
use tabplot::history::{ChartStore, SqliteChartStore};
use tabplot::settings::AppSettings;
use tabplot::workbench::ChartWorkbench;
use tempfile::tempdir;

#[test]
fn submit_saves_exactly_the_submitted_parameters() {
    let dir = tempdir().unwrap();
    let path = xy_csv(dir.path());
    let bench = memory_bench();

    let mut session = bench.begin(&path).unwrap();
    let (record, chart) = bench.submit(&mut session, axes("x", "y")).unwrap();
    assert_eq!(chart.points.len(), 3);

    let stored = bench.store().get_by_id(record.id).unwrap().unwrap();
    assert_eq!(stored.source, path);
    assert_eq!(stored.parameters, Some(axes("x", "y")));
}

#[test]
fn failed_chart_is_not_saved() {
    let dir = tempdir().unwrap();
    let path = xy_csv(dir.path());
    let bench = memory_bench();

    let mut session = bench.begin(&path).unwrap();
    let err = bench.submit(&mut session, axes("x", "z")).unwrap_err();
    assert!(matches!(err, DataError::ColumnNotFound { .. }));

    let err = bench.submit(&mut session, axes("x", "")).unwrap_err();
    assert!(matches!(err, DataError::EmptyValue { .. }));

    assert!(bench.history().unwrap().is_empty());
}

#[test]
fn history_labels_describe_each_source() {
    let dir = tempdir().unwrap();
    let csv = xy_csv(dir.path());
    let db = sales_db(dir.path());
    let bench = memory_bench();

    let mut session = bench.begin(&csv).unwrap();
    bench.submit(&mut session, axes("x", "y")).unwrap();
    let mut session = bench.begin(&db).unwrap();
    bench
        .submit(&mut session, axes("month", "amount").with("table_name", "sales"))
        .unwrap();

    let labels: Vec<String> = bench.history().unwrap().into_iter().map(|e| e.label).collect();
    assert_eq!(labels, vec![format!("CSV | {}", csv), format!("SQLite | {}", db)]);
}

#[test]
fn regenerate_rebuilds_the_same_chart() {
    let dir = tempdir().unwrap();
    let db = sales_db(dir.path());
    let bench = memory_bench();

    let mut session = bench.begin(&db).unwrap();
    let (record, chart) = bench
        .submit(&mut session, axes("month", "amount").with("table_name", "sales"))
        .unwrap();

    assert_eq!(bench.regenerate(record.id).unwrap(), chart);
    assert!(matches!(
        bench.regenerate(record.id + 1),
        Err(DataError::RecordNotFound(_))
    ));
}

#[test]
fn history_survives_a_new_workbench() {
    let dir = tempdir().unwrap();
    let csv = xy_csv(dir.path());
    let history = dir.path().join("history.db");

    let id = {
        let bench = ChartWorkbench::new(FileManager::new(), SqliteChartStore::open(&history).unwrap());
        let mut session = bench.begin(&csv).unwrap();
        bench.submit(&mut session, axes("x", "y")).unwrap().0.id
    };

    let settings = AppSettings {
        history_path: Some(history),
        ..AppSettings::default()
    };
    let bench = ChartWorkbench::from_settings(&settings).unwrap();
    let chart = bench.regenerate(id).unwrap();
    assert_eq!(chart.points.len(), 3);
    assert_eq!(bench.history().unwrap().len(), 1);
}
