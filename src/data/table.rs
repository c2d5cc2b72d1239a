//! The common tabular shape every reader produces.
//!
//! A [`Table`] wraps a polars [`DataFrame`] together with a display name and
//! the [`DataOrigin`] it was read from. Charts consume it only by column name.

use crate::data::error::{DataError, DataResult};
use crate::types::{DataCell, DataColumn, DataOrigin, DataRow, DataType};
use polars::prelude::*;
use std::collections::HashSet;

/// A named column pulled out of a table for charting
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnData {
    pub name: String,
    pub data_type: DataType,
    pub cells: Vec<DataCell>,
}

impl ColumnData {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// In-memory columnar dataset produced by a reader
#[derive(Clone, Debug)]
pub struct Table {
    name: String,
    origin: DataOrigin,
    frame: DataFrame,
}

impl Table {
    pub fn new(name: impl Into<String>, origin: DataOrigin, frame: DataFrame) -> Self {
        Self {
            name: name.into(),
            origin,
            frame,
        }
    }

    /// Build a table from row-oriented cells.
    ///
    /// Number columns become `Float64`, boolean columns `Boolean` and
    /// everything else `String`. Cells that do not fit the column type are
    /// stored as nulls. Duplicate header names get a `.1`, `.2`... suffix.
    pub fn from_rows(
        name: impl Into<String>,
        origin: DataOrigin,
        columns: &[DataColumn],
        rows: &[DataRow],
    ) -> DataResult<Self> {
        let names = dedupe_names(columns.iter().map(|c| c.name.as_str()));

        let series: Vec<Column> = columns
            .iter()
            .zip(names)
            .enumerate()
            .map(|(i, (col, name))| {
                let cells = rows.iter().map(|r| r.cells.get(i));
                let series = match col.data_type {
                    DataType::Number => {
                        let values: Vec<Option<f64>> = cells
                            .map(|c| match c {
                                Some(DataCell::Number(n)) => Some(*n),
                                _ => None,
                            })
                            .collect();
                        Series::new(name.as_str().into(), values)
                    }
                    DataType::Boolean => {
                        let values: Vec<Option<bool>> = cells
                            .map(|c| match c {
                                Some(DataCell::Boolean(b)) => Some(*b),
                                _ => None,
                            })
                            .collect();
                        Series::new(name.as_str().into(), values)
                    }
                    DataType::Text | DataType::Date => {
                        let values: Vec<Option<String>> = cells
                            .map(|c| c.filter(|c| !c.is_empty()).map(DataCell::to_display))
                            .collect();
                        Series::new(name.as_str().into(), values)
                    }
                };
                Column::from(series)
            })
            .collect();

        let frame = DataFrame::new(series)?;
        Ok(Self::new(name, origin, frame))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &DataOrigin {
        &self.origin
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }


    /// Number of rows
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// Column descriptors with polars dtypes mapped onto [`DataType`]
    pub fn columns(&self) -> Vec<DataColumn> {
        self.frame
            .get_columns()
            .iter()
            .map(|c| DataColumn::new(c.name().as_str(), infer_polars_dtype(c.dtype())))
            .collect()
    }

    /// Extract one column by name
    pub fn column(&self, name: &str) -> DataResult<ColumnData> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| DataError::ColumnNotFound {
                column: name.to_string(),
                available: self.column_names(),
            })?;

        let cells = (0..column.len())
            .map(|row_idx| polars_value_to_cell(column, row_idx))
            .collect();

        Ok(ColumnData {
            name: name.to_string(),
            data_type: infer_polars_dtype(column.dtype()),
            cells,
        })
    }

    /// Keep only columns with a numeric dtype
    pub fn numeric_only(self) -> DataResult<Self> {
        let keep: Vec<PlSmallStr> = self
            .frame
            .get_columns()
            .iter()
            .filter(|c| is_numeric_dtype(c.dtype()))
            .map(|c| c.name().clone())
            .collect();

        let frame = self.frame.select(keep)?;
        Ok(Self { frame, ..self })
    }
}

/// Whether polars stores this dtype as a number
pub fn is_numeric_dtype(dtype: &polars::datatypes::DataType) -> bool {
    matches!(
        dtype,
        polars::datatypes::DataType::Int8
            | polars::datatypes::DataType::Int16
            | polars::datatypes::DataType::Int32
            | polars::datatypes::DataType::Int64
            | polars::datatypes::DataType::UInt8
            | polars::datatypes::DataType::UInt16
            | polars::datatypes::DataType::UInt32
            | polars::datatypes::DataType::UInt64
            | polars::datatypes::DataType::Float32
            | polars::datatypes::DataType::Float64
    )
}

/// Map a polars dtype onto the cell-level DataType
fn infer_polars_dtype(dtype: &polars::datatypes::DataType) -> DataType {
    if is_numeric_dtype(dtype) {
        return DataType::Number;
    }
    match dtype {
        polars::datatypes::DataType::Boolean => DataType::Boolean,
        polars::datatypes::DataType::Date | polars::datatypes::DataType::Datetime(_, _) => {
            DataType::Date
        }
        _ => DataType::Text,
    }
}

/// Convert a polars cell value to DataCell
fn polars_value_to_cell(column: &Column, row_idx: usize) -> DataCell {
    let Ok(val) = column.get(row_idx) else {
        return DataCell::Empty;
    };
    match val {
        AnyValue::Null => DataCell::Empty,
        AnyValue::Int8(v) => DataCell::Number(v as f64),
        AnyValue::Int16(v) => DataCell::Number(v as f64),
        AnyValue::Int32(v) => DataCell::Number(v as f64),
        AnyValue::Int64(v) => DataCell::Number(v as f64),
        AnyValue::UInt8(v) => DataCell::Number(v as f64),
        AnyValue::UInt16(v) => DataCell::Number(v as f64),
        AnyValue::UInt32(v) => DataCell::Number(v as f64),
        AnyValue::UInt64(v) => DataCell::Number(v as f64),
        AnyValue::Float32(v) => DataCell::Number(v as f64),
        AnyValue::Float64(v) => DataCell::Number(v),
        AnyValue::Boolean(v) => DataCell::Boolean(v),
        AnyValue::String(s) => DataCell::Text(s.to_string()),
        AnyValue::StringOwned(s) => DataCell::Text(s.as_str().to_string()),
        other => DataCell::Text(format!("{}", other)),
    }
}

/// Make header names unique, pandas style
fn dedupe_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    names
        .map(|name| {
            let mut candidate = name.to_string();
            let mut n = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}.{}", name, n);
                n += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}
