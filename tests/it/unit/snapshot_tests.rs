//! Snapshot tests using the insta crate.
//!
//! Serialized shapes that leave the process (stored chart parameters, the
//! field list shown to the user, history listings) are pinned inline.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use tabplot::data::{FileManager, Params};
use tabplot::history::{ChartStore, MemoryChartStore};
use tabplot::workbench::ChartWorkbench;

#[test]
fn snapshot_chart_record() {
    let store = MemoryChartStore::new();
    let params = Params::new()
        .with("label_column", "x")
        .with("value_column", "y");
    let record = store.create("data.csv", Some(&params)).unwrap();

    insta::assert_json_snapshot!(record, @r###"
    {
      "id": 1,
      "source": "data.csv",
      "parameters": {
        "label_column": "x",
        "value_column": "y"
      }
    }
    "###);
}

#[test]
fn snapshot_sqlite_required_fields() {
    let schema = FileManager::new().required_fields("sales.db").unwrap();

    insta::assert_json_snapshot!(schema, @r###"
    {
      "fields": [
        {
          "name": "table_name",
          "kind": "string",
          "label": "Table name"
        },
        {
          "name": "label_column",
          "kind": "string",
          "label": "Label column"
        },
        {
          "name": "value_column",
          "kind": "string",
          "label": "Value column"
        }
      ]
    }
    "###);
}

#[test]
fn snapshot_remote_required_fields() {
    let schema = FileManager::new().required_fields("mariadb").unwrap();
    let names: Vec<&str> = schema.names();

    insta::assert_json_snapshot!(names, @r###"
    [
      "table_name",
      "host",
      "port",
      "user",
      "password",
      "schema",
      "label_column",
      "value_column"
    ]
    "###);
}

#[test]
fn snapshot_history_listing() {
    let bench = ChartWorkbench::new(FileManager::new(), MemoryChartStore::new());
    let remote = Params::new()
        .with("table_name", "metrics")
        .with("host", "db.internal")
        .with("port", 5432i64)
        .with("user", "reader")
        .with("password", "secret")
        .with("schema", "analytics")
        .with("label_column", "day")
        .with("value_column", "visits");
    bench.store().create("postgresql", Some(&remote)).unwrap();
    bench.store().create("reports/q3.json", None).unwrap();
    bench.store().create("legacy.txt", None).unwrap();

    insta::assert_json_snapshot!(bench.history().unwrap(), @r###"
    [
      {
        "id": 1,
        "source": "postgresql",
        "label": "PostgreSQL | db.internal/metrics"
      },
      {
        "id": 2,
        "source": "reports/q3.json",
        "label": "JSON | reports/q3.json"
      },
      {
        "id": 3,
        "source": "legacy.txt",
        "label": "legacy.txt"
      }
    ]
    "###);
}
