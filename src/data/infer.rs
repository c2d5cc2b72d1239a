//! Column type inference for readers that produce text or loosely typed cells.
//!
//! HTML, XML and both remote engines hand back strings; SQLite hands back
//! typed cells whose column type still has to be decided. Both paths end in
//! a `(columns, rows)` pair ready for
//! [`Table::from_rows`](crate::data::Table::from_rows).

use crate::constants::TYPE_INFERENCE_SAMPLE_ROWS;
use crate::types::{DataCell, DataColumn, DataRow, DataType};

/// Build typed columns and rows from header names and raw text records.
///
/// Short records are padded with empty cells; extra cells are dropped.
pub fn rows_from_text(headers: &[String], records: &[Vec<String>]) -> (Vec<DataColumn>, Vec<DataRow>) {
    let columns: Vec<DataColumn> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| DataColumn::new(name.trim(), infer_column_type(records, i)))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            DataRow::new(
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, col)| {
                        record
                            .get(i)
                            .map(|cell| DataCell::parse(cell.trim(), &col.data_type))
                            .unwrap_or(DataCell::Empty)
                    })
                    .collect(),
            )
        })
        .collect();

    (columns, rows)
}

/// Decide column types for already-typed cells.
///
/// A column is numeric when every non-empty sampled cell is a number,
/// boolean when every one is a boolean, and text otherwise.
pub fn columns_from_cells(names: &[String], rows: &[DataRow]) -> Vec<DataColumn> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let sample: Vec<&DataCell> = rows
                .iter()
                .take(TYPE_INFERENCE_SAMPLE_ROWS)
                .filter_map(|r| r.cells.get(i))
                .filter(|c| !c.is_empty())
                .collect();

            let data_type = if sample.is_empty() {
                DataType::Text
            } else if sample.iter().all(|c| matches!(c, DataCell::Number(_))) {
                DataType::Number
            } else if sample.iter().all(|c| matches!(c, DataCell::Boolean(_))) {
                DataType::Boolean
            } else {
                DataType::Text
            };
            DataColumn::new(name, data_type)
        })
        .collect()
}

/// Check if a string looks like a number
///
/// Rejects strings with multiple symbols or non-numeric characters beyond
/// single symbols like $ or %.
///
/// # Examples
/// - `"123"` -> true
/// - `"$123.45"` -> true
/// - `"1,2,3"` -> false (commas not between 3-digit groups)
/// - `"abc"` -> false
pub(crate) fn looks_like_number(s: &str) -> bool {
    let cleaned = s.trim();
    if cleaned.is_empty() {
        return false;
    }

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let symbol_count = cleaned.matches('$').count()
        + cleaned.matches('%').count()
        + cleaned.matches('€').count()
        + cleaned.matches('£').count();
    if symbol_count > 1 {
        return false;
    }

    crate::types::parse_number(cleaned).is_some()
}

/// Infer the data type for a column by sampling values
fn infer_column_type(records: &[Vec<String>], col_idx: usize) -> DataType {
    let sample: Vec<&str> = records
        .iter()
        .take(TYPE_INFERENCE_SAMPLE_ROWS)
        .filter_map(|r| r.get(col_idx).map(|s| s.as_str()))
        .filter(|s| !s.trim().is_empty())
        .collect();

    if sample.is_empty() {
        return DataType::Text;
    }

    if sample.iter().all(|s| looks_like_number(s)) {
        return DataType::Number;
    }

    let all_bools = sample.iter().all(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "false" | "yes" | "no" | "y" | "n"
        )
    });
    if all_bools {
        return DataType::Boolean;
    }

    // Common date patterns: YYYY-MM-DD, MM/DD/YYYY, DD/MM/YYYY
    let looks_like_dates = sample.iter().all(|s| {
        let trimmed = s.trim();
        (trimmed.contains('-') || trimmed.contains('/'))
            && (8..=10).contains(&trimmed.len())
            && trimmed.chars().filter(|c| c.is_ascii_digit()).count() >= 6
    });
    if looks_like_dates {
        return DataType::Date;
    }

    DataType::Text
}
