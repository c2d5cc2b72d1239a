//! Parameter contracts: declared fields and validation of supplied values.
//!
//! A [`ParameterSchema`] lists the fields a reader needs, each with an
//! expected [`ParamKind`] and a label for the input form. [`validate`] checks a
//! [`Params`] mapping against a schema without coercing anything.

use crate::data::error::{DataError, DataResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Kinds and Values
// ============================================================================

/// Runtime kind of a parameter value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Float => "float",
            ParamKind::Boolean => "boolean",
            ParamKind::Null => "null",
        };
        f.pad(name)
    }
}

/// A single supplied parameter value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Null,
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Integer(_) => ParamKind::Integer,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Boolean(_) => ParamKind::Boolean,
            ParamValue::Text(_) => ParamKind::String,
            ParamValue::Null => ParamKind::Null,
        }
    }

    /// Empty string, false and null are falsy; zero only when `zero_is_falsy`
    pub fn is_falsy(&self, zero_is_falsy: bool) -> bool {
        match self {
            ParamValue::Text(s) => s.is_empty(),
            ParamValue::Integer(n) => zero_is_falsy && *n == 0,
            ParamValue::Float(n) => zero_is_falsy && *n == 0.0,
            ParamValue::Boolean(b) => !*b,
            ParamValue::Null => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert raw form input according to the declared kind.
    ///
    /// Integer fields become integers when the text parses; anything else
    /// stays text so validation can report the mismatch.
    pub fn from_input(raw: &str, kind: ParamKind) -> Self {
        match kind {
            ParamKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(ParamValue::Integer)
                .unwrap_or_else(|_| ParamValue::Text(raw.to_string())),
            _ => ParamValue::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(n) => write!(f, "{}", n),
            ParamValue::Float(n) => write!(f, "{}", n),
            ParamValue::Boolean(b) => write!(f, "{}", b),
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Integer(n)
    }
}

// ============================================================================
// Params
// ============================================================================

/// Supplied parameter values, keyed by field name
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// Text value of a field, if present and textual
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Schema
// ============================================================================

/// One required field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: ParamKind,
    pub label: String,
}

impl FieldSpec {
    pub fn new(name: &str, kind: ParamKind, label: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            label: label.to_string(),
        }
    }
}

/// Ordered set of required fields, names unique
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    fields: Vec<FieldSpec>,
}

impl ParameterSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let mut schema = Self::default();
        for field in fields {
            schema.push(field);
        }
        schema
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a field, replacing any existing field of the same name in place
    pub fn push(&mut self, field: FieldSpec) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Union of two schemas; fields of `other` win on name clashes
    pub fn merged(&self, other: &ParameterSchema) -> ParameterSchema {
        let mut merged = self.clone();
        for field in &other.fields {
            merged.push(field.clone());
        }
        merged
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Field name -> display label
    pub fn labels(&self) -> BTreeMap<&str, &str> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.label.as_str()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Knobs for [`validate`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Treat numeric zero as an empty value
    pub reject_zero: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self { reject_zero: true }
    }
}

/// Check `provided` against `required`.
///
/// Fields are checked in schema order: presence first for all fields, then
/// emptiness and kind per field. Names in `provided` that the schema does not
/// mention are ignored.
pub fn validate(
    required: &ParameterSchema,
    provided: &Params,
    policy: &ValidationPolicy,
) -> DataResult<()> {
    if required.is_empty() {
        return Ok(());
    }

    let missing: Vec<String> = required
        .fields()
        .iter()
        .filter(|f| !provided.contains(&f.name))
        .map(|f| f.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingParameters { missing });
    }

    for field in required.fields() {
        let Some(value) = provided.get(&field.name) else {
            continue;
        };

        if value.is_falsy(policy.reject_zero) {
            return Err(DataError::EmptyValue {
                field: field.name.clone(),
            });
        }

        let actual = value.kind();
        if actual != field.kind {
            return Err(DataError::TypeMismatch {
                field: field.name.clone(),
                expected: field.kind,
                actual,
            });
        }
    }

    Ok(())
}
