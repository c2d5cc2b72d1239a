//! JSON files holding an array of records or an object of columns.
//!
//! A top-level array is decoded by polars. A top-level object is taken
//! column by column: each key maps either to a list of values or to an
//! object keyed by row index.

use super::{SourceReader, check_suffix, file_stem};
use crate::constants::INFER_SCHEMA_ROWS;
use crate::data::error::{DataError, DataResult};
use crate::data::infer::columns_from_cells;
use crate::data::table::Table;
use crate::types::{DataCell, DataOrigin, DataRow};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::io::Cursor;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// JSON file reader
pub struct JsonReader {
    path: String,
}

impl JsonReader {
    pub const EXTENSION: &'static str = "json";
    pub const DISPLAY_NAME: &'static str = "JSON";

    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn read_records(&self, bytes: Vec<u8>) -> DataResult<DataFrame> {
        polars::prelude::JsonReader::new(Cursor::new(bytes))
            .with_json_format(JsonFormat::Json)
            .infer_schema_len(NonZeroUsize::new(INFER_SCHEMA_ROWS))
            .finish()
            .map_err(|e| DataError::read(&self.path, e))
    }

    fn read_columns(&self, object: Map<String, Value>) -> DataResult<Table> {
        let mut names = Vec::with_capacity(object.len());
        let mut columns = Vec::with_capacity(object.len());
        for (name, values) in object {
            let cells = column_cells(values).ok_or_else(|| {
                DataError::read(
                    &self.path,
                    format!("column \"{}\" is neither a list nor an object", name),
                )
            })?;
            names.push(name);
            columns.push(cells);
        }

        let height = columns.iter().map(Vec::len).max().unwrap_or(0);
        let rows: Vec<DataRow> = (0..height)
            .map(|i| {
                DataRow::new(
                    columns
                        .iter()
                        .map(|cells| cells.get(i).cloned().unwrap_or(DataCell::Empty))
                        .collect(),
                )
            })
            .collect();

        Table::from_rows(
            file_stem(&self.path),
            DataOrigin::File {
                path: PathBuf::from(&self.path),
            },
            &columns_from_cells(&names, &rows),
            &rows,
        )
    }
}

/// Cells of one column in row order. Index-keyed objects are ordered by
/// numeric index when every key is an integer.
fn column_cells(values: Value) -> Option<Vec<DataCell>> {
    match values {
        Value::Array(items) => Some(items.into_iter().map(json_cell).collect()),
        Value::Object(by_index) => {
            let mut entries: Vec<(String, Value)> = by_index.into_iter().collect();
            if entries.iter().all(|(k, _)| k.parse::<i64>().is_ok()) {
                entries.sort_by_key(|(k, _)| k.parse::<i64>().unwrap_or_default());
            }
            Some(entries.into_iter().map(|(_, v)| json_cell(v)).collect())
        }
        _ => None,
    }
}

fn json_cell(value: Value) -> DataCell {
    match value {
        Value::Null => DataCell::Empty,
        Value::Bool(b) => DataCell::Boolean(b),
        Value::Number(n) => n.as_f64().map(DataCell::Number).unwrap_or(DataCell::Empty),
        Value::String(s) => DataCell::Text(s),
        other => DataCell::Text(other.to_string()),
    }
}

impl SourceReader for JsonReader {
    fn display_name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn validate_source(&self) -> DataResult<()> {
        check_suffix(Self::DISPLAY_NAME, &self.path, Self::EXTENSION)
    }

    fn read(&self) -> DataResult<Table> {
        let start = std::time::Instant::now();
        let path = PathBuf::from(&self.path);

        let bytes = std::fs::read(&path).map_err(|e| DataError::read(&self.path, e))?;
        let top: Value =
            serde_json::from_slice(&bytes).map_err(|e| DataError::read(&self.path, e))?;

        let table = match top {
            Value::Object(object) => self.read_columns(object)?,
            Value::Array(_) => {
                let frame = self.read_records(bytes)?;
                Table::new(file_stem(&self.path), DataOrigin::File { path: path.clone() }, frame)
            }
            _ => {
                return Err(DataError::read(
                    &self.path,
                    "expected an array of records or an object of columns",
                ));
            }
        };

        tracing::debug!(
            "Loaded JSON {} with {} rows x {} cols in {:?}",
            path.display(),
            table.height(),
            table.width(),
            start.elapsed()
        );

        table.numeric_only()
    }

    fn describe(&self) -> String {
        format!("{} | {}", Self::DISPLAY_NAME, self.path)
    }
}
