//! File manager flows: field discovery, validation failures and charting.

use crate::helpers::{axes, sales_db, xy_csv};
use std::time::Duration;
use tabplot::data::{DataError, ErrorCategory, FileManager, OpenOptions, ParamKind, Params};
use tempfile::tempdir;

#[test]
fn required_fields_are_idempotent() {
    let manager = FileManager::new();
    for identifier in ["data.csv", "sales.db", "postgresql"] {
        let first = manager.required_fields(identifier).unwrap();
        let second = manager.required_fields(identifier).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.labels(), second.labels());
    }
}

#[test]
fn csv_needs_only_the_axes() {
    let schema = FileManager::new().required_fields("data.csv").unwrap();
    assert_eq!(schema.names(), vec!["label_column", "value_column"]);
}

#[test]
fn integer_value_column_is_a_type_mismatch() {
    let manager = FileManager::new();
    let mut session = manager.begin("data.csv").unwrap();
    let values = Params::new().with("label_column", "x").with("value_column", 42i64);

    match session.set_parameters(values).unwrap_err() {
        DataError::TypeMismatch {
            field,
            expected,
            actual,
        } => {
            assert_eq!(field, "value_column");
            assert_eq!(expected, ParamKind::String);
            assert_eq!(actual, ParamKind::Integer);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!session.is_ready());
}

#[test]
fn sqlite_without_table_name_lists_it_as_missing() {
    let manager = FileManager::new();
    let mut session = manager.begin("sales.db").unwrap();
    let err = session.set_parameters(axes("month", "amount")).unwrap_err();
    assert!(matches!(err, DataError::MissingParameters { ref missing } if missing == &["table_name"]));

    let err = manager
        .generate_chart("sales.db", &axes("month", "amount"))
        .unwrap_err();
    assert!(matches!(err, DataError::MissingParameters { ref missing } if missing == &["table_name"]));
}

#[test]
fn absent_value_column_is_named() {
    let dir = tempdir().unwrap();
    let path = xy_csv(dir.path());

    let err = FileManager::new()
        .generate_chart(&path, &axes("x", "z"))
        .unwrap_err();
    match err {
        DataError::ColumnNotFound { column, available } => {
            assert_eq!(column, "z");
            assert_eq!(available, vec!["x", "y"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn text_columns_cannot_be_charted_from_csv() {
    let dir = tempdir().unwrap();
    let path = xy_csv(dir.path());

    let err = FileManager::new()
        .generate_chart(&path, &axes("name", "y"))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Column);
}

#[test]
fn csv_chart_keeps_row_order() {
    let dir = tempdir().unwrap();
    let path = xy_csv(dir.path());

    let chart = FileManager::new().generate_chart(&path, &axes("x", "y")).unwrap();
    let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
    let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();
    assert_eq!(labels, vec!["1", "2", "3"]);
    assert_eq!(values, vec![10.0, 20.0, 15.0]);
    assert_eq!((chart.min_value, chart.max_value), (10.0, 20.0));
    assert_eq!((chart.x_label.as_str(), chart.y_label.as_str()), ("x", "y"));
}

#[test]
fn sqlite_chart_from_named_table() {
    let dir = tempdir().unwrap();
    let path = sales_db(dir.path());
    let params = axes("month", "amount").with("table_name", "sales");

    let manager = FileManager::new();
    let chart = manager.generate_chart(&path, &params).unwrap();
    assert_eq!(chart.points.len(), 3);
    assert_eq!(chart.points[1].value, 140.5);

    let label = manager.describe_source(&path, Some(&params)).unwrap();
    assert_eq!(label, format!("SQLite | {}", path));
}

#[test]
fn unknown_table_in_sqlite_is_a_read_error() {
    let dir = tempdir().unwrap();
    let path = sales_db(dir.path());
    let params = axes("month", "amount").with("table_name", "returns");

    let err = FileManager::new().generate_chart(&path, &params).unwrap_err();
    assert!(matches!(err, DataError::SourceRead { .. }));
    assert_eq!(err.category(), ErrorCategory::Read);
}

#[test]
fn unreachable_remote_is_a_read_error() {
    let manager = FileManager::new().options(OpenOptions {
        connect_timeout: Some(Duration::from_secs(2)),
        ..OpenOptions::default()
    });
    let params = axes("day", "visits")
        .with("table_name", "metrics")
        .with("host", "127.0.0.1")
        .with("port", 1i64)
        .with("user", "reader")
        .with("password", "secret")
        .with("schema", "analytics");

    for dialect in ["postgresql", "mysql"] {
        let err = manager.generate_chart(dialect, &params).unwrap_err();
        assert!(
            matches!(err, DataError::SourceRead { .. }),
            "{dialect}: {err}"
        );
    }
}

#[test]
fn zero_port_is_rejected_by_default() {
    let params = axes("day", "visits")
        .with("table_name", "metrics")
        .with("host", "db.internal")
        .with("port", 0i64)
        .with("user", "reader")
        .with("password", "secret")
        .with("schema", "analytics");

    let err = FileManager::new()
        .generate_chart("mariadb", &params)
        .unwrap_err();
    assert!(matches!(err, DataError::EmptyValue { ref field } if field == "port"));
}
