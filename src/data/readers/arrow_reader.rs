//! Binary-serialized tables in the Arrow IPC file format.

use super::{SourceReader, check_suffix, file_stem};
use crate::data::error::{DataError, DataResult};
use crate::data::table::Table;
use crate::types::DataOrigin;
use polars::prelude::*;
use std::path::PathBuf;

/// Arrow IPC file reader
pub struct ArrowReader {
    path: String,
}

impl ArrowReader {
    pub const EXTENSION: &'static str = "arrow";
    pub const DISPLAY_NAME: &'static str = "Arrow";

    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceReader for ArrowReader {
    fn display_name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn validate_source(&self) -> DataResult<()> {
        check_suffix(Self::DISPLAY_NAME, &self.path, Self::EXTENSION)
    }

    fn read(&self) -> DataResult<Table> {
        let start = std::time::Instant::now();
        let path = PathBuf::from(&self.path);

        let file = std::fs::File::open(&path).map_err(|e| DataError::read(&self.path, e))?;
        let frame = IpcReader::new(file)
            .finish()
            .map_err(|e| DataError::read(&self.path, e))?;

        tracing::debug!(
            "Loaded Arrow {} with {} rows x {} cols in {:?}",
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
