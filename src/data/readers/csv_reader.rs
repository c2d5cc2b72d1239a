//! Delimited text files, scanned lazily with polars.

use super::{SourceReader, check_suffix, file_stem};
use crate::constants::INFER_SCHEMA_ROWS;
use crate::data::error::{DataError, DataResult};
use crate::data::table::Table;
use crate::types::DataOrigin;
use polars::prelude::*;
use std::path::PathBuf;

/// CSV file reader
pub struct CsvReader {
    path: String,
}

impl CsvReader {
    pub const EXTENSION: &'static str = "csv";
    pub const DISPLAY_NAME: &'static str = "CSV";

    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceReader for CsvReader {
    fn display_name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn validate_source(&self) -> DataResult<()> {
        check_suffix(Self::DISPLAY_NAME, &self.path, Self::EXTENSION)
    }

    fn read(&self) -> DataResult<Table> {
        let start = std::time::Instant::now();
        let path = PathBuf::from(&self.path);

        let frame = LazyCsvReader::new(&path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()
            .and_then(|lf| lf.collect())
            .map_err(|e| DataError::read(&self.path, e))?;

        tracing::debug!(
            "Loaded CSV {} with {} rows x {} cols in {:?}",
            path.display(),
            frame.height(),
            frame.width(),
            start.elapsed()
        );

        Table::new(file_stem(&self.path), DataOrigin::File { path }, frame).numeric_only()
    }

    fn describe(&self) -> String {
        format!("{} | {}", Self::DISPLAY_NAME, self.path)
    }
}
