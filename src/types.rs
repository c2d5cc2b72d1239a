//! Core cell and column types shared by the readers and the chart engine.
//!
//! Readers that decode text (HTML, XML, the remote engines) or read row by
//! row (SQLite) build [`DataRow`]s of [`DataCell`]s first and convert them
//! into a columnar table afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Columns and Cells
// ============================================================================

/// Column metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    /// Column name/header
    pub name: String,
    /// Data type for this column
    pub data_type: DataType,
}

impl DataColumn {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Supported data types for cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
}

/// A row of data cells
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub cells: Vec<DataCell>,
}

impl DataRow {
    pub fn new(cells: Vec<DataCell>) -> Self {
        Self { cells }
    }
}

/// A single cell value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataCell {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(String), // ISO 8601 format
    Empty,
}

impl DataCell {
    /// Convert cell to string representation
    pub fn to_display(&self) -> String {
        match self {
            DataCell::Text(s) => s.clone(),
            DataCell::Number(n) => {
                // No trailing zeros for whole numbers that fit an i64 exactly
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            DataCell::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
            DataCell::Date(d) => d.clone(),
            DataCell::Empty => String::new(),
        }
    }

    /// Numeric value of the cell, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataCell::Number(n) => Some(*n),
            DataCell::Text(s) => s.trim().parse().ok(),
            DataCell::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            DataCell::Date(_) | DataCell::Empty => None,
        }
    }

    /// Parse a string into a DataCell, trying to preserve type
    pub fn parse(value: &str, hint: &DataType) -> Self {
        if value.is_empty() {
            return DataCell::Empty;
        }

        match hint {
            DataType::Number => parse_number(value)
                .map(DataCell::Number)
                .unwrap_or(DataCell::Text(value.to_string())),
            DataType::Boolean => match value.to_lowercase().as_str() {
                "true" | "yes" | "1" | "y" => DataCell::Boolean(true),
                "false" | "no" | "0" | "n" => DataCell::Boolean(false),
                _ => DataCell::Text(value.to_string()),
            },
            DataType::Date => DataCell::Date(value.to_string()),
            DataType::Text => DataCell::Text(value.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DataCell::Empty)
    }
}

/// Parse a number that may carry a currency/percent symbol or thousand separators.
///
/// Commas are accepted only as separators between 3-digit groups of the
/// integer part, so `"1,5"` is not a number.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | '€' | '£'))
        .collect();
    if !cleaned.contains(',') {
        return cleaned.parse::<f64>().ok();
    }

    let (integer, fraction) = match cleaned.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (cleaned.as_str(), ""),
    };
    if fraction.contains(',') {
        return None;
    }

    let mut groups = integer.trim_start_matches(['-', '+']).split(',');
    let lead_ok = groups.next().is_some_and(|g| (1..=3).contains(&g.len()));
    if !lead_ok || !groups.all(|g| g.len() == 3) {
        return None;
    }
    cleaned.replace(',', "").parse::<f64>().ok()
}

// ============================================================================
// Origins
// ============================================================================

/// Where a table came from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataOrigin {
    /// A local file decoded as a whole
    File { path: PathBuf },
    /// One table of an embedded relational file
    Embedded { path: PathBuf, table: String },
    /// One table of a remote relational engine
    Remote {
        dialect: String,
        host: String,
        table: String,
    },
}
