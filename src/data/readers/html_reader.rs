//! Tables extracted from HTML documents.
//!
//! Only the first `<table>` of the document is returned, and unlike every
//! other reader its columns are not filtered down to numeric ones.

use super::{SourceReader, check_suffix, file_stem};
use crate::data::error::{DataError, DataResult};
use crate::data::infer::rows_from_text;
use crate::data::table::Table;
use crate::types::DataOrigin;
use scraper::{ElementRef, Html, Selector};
use std::path::PathBuf;

/// HTML table reader
pub struct HtmlReader {
    path: String,
}

impl HtmlReader {
    pub const EXTENSION: &'static str = "html";
    pub const DISPLAY_NAME: &'static str = "HTML";

    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceReader for HtmlReader {
    fn display_name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    fn validate_source(&self) -> DataResult<()> {
        check_suffix(Self::DISPLAY_NAME, &self.path, Self::EXTENSION)
    }

    fn read(&self) -> DataResult<Table> {
        let start = std::time::Instant::now();
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| DataError::read(&self.path, e))?;

        let (headers, records) = extract_first_table(&content)
            .map_err(|reason| DataError::read(&self.path, reason))?;
        let (columns, rows) = rows_from_text(&headers, &records);

        tracing::debug!(
            "Extracted HTML table from {} with {} rows x {} cols in {:?}",
            self.path,
            rows.len(),
            columns.len(),
            start.elapsed()
        );

        Table::from_rows(
            file_stem(&self.path),
            DataOrigin::File {
                path: PathBuf::from(&self.path),
            },
            &columns,
            &rows,
        )
    }

    fn describe(&self) -> String {
        format!("{} | {}", Self::DISPLAY_NAME, self.path)
    }
}

type TextTable = (Vec<String>, Vec<Vec<String>>);

/// Header names and body records of the first table in a document.
///
/// The header is the first row made of `<th>` cells; without one, columns are
/// numbered from 0.
fn extract_first_table(content: &str) -> Result<TextTable, String> {
    let document = Html::parse_document(content);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let header_sel = selector("th")?;
    let data_sel = selector("td")?;
    let cell_sel = selector("td, th")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| "no <table> found".to_string())?;

    let mut headers: Option<Vec<String>> = None;
    let mut records: Vec<Vec<String>> = Vec::new();

    for row in table.select(&row_sel) {
        let is_header_row = row.select(&header_sel).next().is_some()
            && row.select(&data_sel).next().is_none();
        let cells: Vec<String> = row.select(&cell_sel).map(cell_text).collect();

        if is_header_row && headers.is_none() && records.is_empty() {
            headers = Some(cells);
        } else if !cells.is_empty() {
            records.push(cells);
        }
    }

    let headers = headers.unwrap_or_else(|| {
        let width = records.iter().map(Vec::len).max().unwrap_or(0);
        (0..width).map(|i| i.to_string()).collect()
    });

    if headers.is_empty() {
        return Err("table has no columns".to_string());
    }

    Ok((headers, records))
}

fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| e.to_string())
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}
