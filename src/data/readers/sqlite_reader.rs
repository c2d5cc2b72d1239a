//! One table of an embedded SQLite database file.

use super::{OpenOptions, SourceReader, check_suffix, text_or_placeholder};
use crate::data::error::{DataError, DataResult};
use crate::data::infer::columns_from_cells;
use crate::data::params::{FieldSpec, ParamKind, ParameterSchema, Params, validate};
use crate::data::table::Table;
use crate::types::{DataCell, DataOrigin, DataRow};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;

/// Parameters of the SQLite reader
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqliteConfig {
    pub table_name: String,
}

impl SqliteConfig {
    pub fn schema() -> ParameterSchema {
        ParameterSchema::new(vec![FieldSpec::new(
            "table_name",
            ParamKind::String,
            "Table name",
        )])
    }

    /// Parse the config, validating against [`Self::schema`] unless told not to
    pub fn from_params(params: &Params, options: &OpenOptions) -> DataResult<Self> {
        if options.validate {
            validate(&Self::schema(), params, &options.policy)?;
        }
        Ok(Self {
            table_name: text_or_placeholder(params, "table_name"),
        })
    }
}

/// SQLite table reader
pub struct SqliteReader {
    path: String,
    config: SqliteConfig,
}

impl SqliteReader {
    pub const EXTENSION: &'static str = "db";
    pub const DISPLAY_NAME: &'static str = "SQLite";

    pub fn new(path: impl Into<String>, config: SqliteConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    fn read_rows(&self) -> rusqlite::Result<(Vec<String>, Vec<DataRow>)> {
        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let query = format!("SELECT * FROM {}", quote_identifier(&self.config.table_name));
        let mut stmt = conn.prepare(&query)?;

        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let width = names.len();

        let rows = stmt
            .query_map([], |row| {
                let cells = (0..width)
                    .map(|i| row.get_ref(i).map(value_to_cell))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(DataRow::new(cells))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((names, rows))
    }
}

impl SourceReader for SqliteReader {
    fn display_name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn validate_source(&self) -> DataResult<()> {
        check_suffix(Self::DISPLAY_NAME, &self.path, Self::EXTENSION)
    }

    fn read(&self) -> DataResult<Table> {
        let start = std::time::Instant::now();
        let (names, rows) = self
            .read_rows()
            .map_err(|e| DataError::read(&self.path, e))?;
        let columns = columns_from_cells(&names, &rows);

        tracing::debug!(
            "Loaded SQLite table {} from {} with {} rows x {} cols in {:?}",
            self.config.table_name,
            self.path,
            rows.len(),
            columns.len(),
            start.elapsed()
        );

        Table::from_rows(
            self.config.table_name.clone(),
            DataOrigin::Embedded {
                path: PathBuf::from(&self.path),
                table: self.config.table_name.clone(),
            },
            &columns,
            &rows,
        )?
        .numeric_only()
    }

    fn describe(&self) -> String {
        format!("{} | {}", Self::DISPLAY_NAME, self.path)
    }
}

/// Double-quote an SQL identifier
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn value_to_cell(value: ValueRef<'_>) -> DataCell {
    match value {
        ValueRef::Null => DataCell::Empty,
        ValueRef::Integer(n) => DataCell::Number(n as f64),
        ValueRef::Real(n) => DataCell::Number(n),
        ValueRef::Text(bytes) => DataCell::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(_) => DataCell::Empty,
    }
}
