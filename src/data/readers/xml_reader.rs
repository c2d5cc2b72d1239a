//! Record-oriented XML documents.
//!
//! Every element child of the root is a row. A row's attributes and the text
//! of its element children become columns, in order of first appearance.

use super::{SourceReader, check_suffix, file_stem};
use crate::data::error::{DataError, DataResult};
use crate::data::infer::rows_from_text;
use crate::data::table::Table;
use crate::types::DataOrigin;
use std::path::PathBuf;

/// XML file reader
pub struct XmlReader {
    path: String,
}

impl XmlReader {
    pub const EXTENSION: &'static str = "xml";
    pub const DISPLAY_NAME: &'static str = "XML";

    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceReader for XmlReader {
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

        let (headers, records) =
            parse_records(&content).map_err(|e| DataError::read(&self.path, e))?;
        let (columns, rows) = rows_from_text(&headers, &records);

        tracing::debug!(
            "Loaded XML {} with {} rows x {} cols in {:?}",
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
        )?
        .numeric_only()
    }

    fn describe(&self) -> String {
        format!("{} | {}", Self::DISPLAY_NAME, self.path)
    }
}

/// Column names and text records of a record-oriented document
fn parse_records(content: &str) -> Result<(Vec<String>, Vec<Vec<String>>), roxmltree::Error> {
    let document = roxmltree::Document::parse(content)?;

    let mut headers: Vec<String> = Vec::new();
    let mut raw_rows: Vec<Vec<(String, String)>> = Vec::new();

    for row in document.root_element().children().filter(|n| n.is_element()) {
        let mut fields: Vec<(String, String)> = row
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        for child in row.children().filter(|n| n.is_element()) {
            let text = child.text().unwrap_or_default().trim().to_string();
            fields.push((child.tag_name().name().to_string(), text));
        }

        for (name, _) in &fields {
            if !headers.contains(name) {
                headers.push(name.clone());
            }
        }
        raw_rows.push(fields);
    }

    let records = raw_rows
        .into_iter()
        .map(|fields| {
            headers
                .iter()
                .map(|h| {
                    fields
                        .iter()
                        .find(|(name, _)| name == h)
                        .map(|(_, value)| value.clone())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    Ok((headers, records))
}
