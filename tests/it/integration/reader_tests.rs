//! Every file reader against a real fixture, through the file manager.

use crate::helpers::{axes, write_fixture};
use polars::prelude::{IpcWriter, SerWriter};
use tabplot::data::{DataError, FileManager};
use tempfile::tempdir;

#[test]
fn json_array_of_records() {
    let dir = tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "visits.json",
        r#"[
            {"day": 1, "visits": 120, "note": "launch"},
            {"day": 2, "visits": 95.5, "note": "quiet"},
            {"day": 3, "visits": 130, "note": "promo"}
        ]"#,
    );

    let chart = FileManager::new()
        .generate_chart(&path, &axes("day", "visits"))
        .unwrap();
    assert_eq!(chart.points.len(), 3);
    assert_eq!(chart.points[1].value, 95.5);

    let err = FileManager::new()
        .generate_chart(&path, &axes("day", "note"))
        .unwrap_err();
    assert!(matches!(err, DataError::ColumnNotFound { ref column, .. } if column == "note"));
}

#[test]
fn arrow_ipc_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("series.arrow");
    let mut frame = polars::df!(
        "step" => [1i64, 2, 3, 4],
        "loss" => [0.9f64, 0.6, 0.45, 0.4]
    )
    .unwrap();
    let mut file = std::fs::File::create(&path).unwrap();
    IpcWriter::new(&mut file).finish(&mut frame).unwrap();

    let chart = FileManager::new()
        .generate_chart(&path.to_string_lossy(), &axes("step", "loss"))
        .unwrap();
    assert_eq!(chart.points.len(), 4);
    assert_eq!(chart.points[3].label, "4");
    assert_eq!(chart.min_value, 0.4);
}

#[test]
fn html_keeps_text_label_column() {
    let dir = tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "report.html",
        r#"<html><body>
             <h1>Revenue</h1>
             <table>
               <tr><th>Month</th><th>Revenue</th></tr>
               <tr><td>Jan</td><td>$1,200</td></tr>
               <tr><td>Feb</td><td>$1,350</td></tr>
               <tr><td>Mar</td><td>$990</td></tr>
             </table>
           </body></html>"#,
    );

    let chart = FileManager::new()
        .generate_chart(&path, &axes("Month", "Revenue"))
        .unwrap();
    let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Jan", "Feb", "Mar"]);
    assert_eq!(chart.max_value, 1350.0);
}

#[test]
fn xml_records_are_filtered_to_numbers() {
    let dir = tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "readings.xml",
        r#"<?xml version="1.0"?>
           <readings>
             <reading hour="1"><site>north</site><temp>3.5</temp></reading>
             <reading hour="2"><site>north</site><temp>4.0</temp></reading>
             <reading hour="3"><site>south</site><temp>2.25</temp></reading>
           </readings>"#,
    );

    let manager = FileManager::new();
    let chart = manager.generate_chart(&path, &axes("hour", "temp")).unwrap();
    assert_eq!(chart.points.len(), 3);

    let err = manager.generate_chart(&path, &axes("site", "temp")).unwrap_err();
    assert!(matches!(err, DataError::ColumnNotFound { ref column, .. } if column == "site"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();
    for name in ["gone.csv", "gone.json", "gone.arrow", "gone.html", "gone.xml"] {
        let path = dir.path().join(name);
        let err = FileManager::new()
            .generate_chart(&path.to_string_lossy(), &axes("x", "y"))
            .unwrap_err();
        assert!(matches!(err, DataError::SourceRead { .. }), "{name}: {err}");
    }
}

#[test]
fn json_object_of_column_lists() {
    let dir = tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "columns.json",
        r#"{"x": [1, 2, 3], "y": [10, 20.5, 15], "note": ["a", "b", "c"]}"#,
    );

    let chart = FileManager::new()
        .generate_chart(&path, &axes("x", "y"))
        .unwrap();
    let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![10.0, 20.5, 15.0]);
    assert_eq!(chart.points[2].label, "3");
}

#[test]
fn non_finite_values_are_not_plotted() {
    let dir = tempdir().unwrap();
    let path = write_fixture(dir.path(), "gaps.csv", "x,y\n1,10\n2,NaN\n3,15\n4,inf\n");

    let chart = FileManager::new()
        .generate_chart(&path, &axes("x", "y"))
        .unwrap();
    let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "3"]);
    assert_eq!((chart.min_value, chart.max_value), (10.0, 15.0));

    let svg = chart.to_svg(400, 300);
    assert!(!svg.contains("NaN"));
    assert!(!svg.contains("inf"));
}
