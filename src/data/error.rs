//! Error types for data operations
//!
//! Provides unified error handling for source resolution, parameter
//! validation, reading and charting. Every variant renders a message fit for
//! showing to the user as-is.

use crate::data::params::ParamKind;
use thiserror::Error;

/// Boxed underlying failure carried by [`DataError::SourceRead`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// Required parameters were not supplied
    #[error("Missing parameters: {}", .missing.join(", "))]
    MissingParameters { missing: Vec<String> },

    /// A parameter is present but empty, zero or null
    #[error("Value for field \"{field}\" is empty")]
    EmptyValue { field: String },

    /// A parameter has the wrong runtime type
    #[error("Wrong type for field \"{field}\": expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: ParamKind,
        actual: ParamKind,
    },

    /// A parameter has the right type but an unusable value
    #[error("Invalid value for field \"{field}\": {reason}")]
    InvalidParameter { field: String, reason: String },

    /// The identifier has no suffix, or the suffix is not allow-listed
    #[error("Unknown file extension \"{extension}\" (allowed: {})", .allowed.join(", "))]
    UnknownExtension {
        extension: String,
        allowed: Vec<String>,
    },

    /// The suffix is allow-listed but no reader handles it
    #[error("Extension \"{extension}\" is not supported (supported: {})", .supported.join(", "))]
    UnsupportedExtension {
        extension: String,
        supported: Vec<String>,
    },

    /// No reader is registered under the resolved key
    #[error("No reader found for \"{0}\"")]
    ReaderNotFound(String),

    /// The identifier does not fit the reader it was handed to
    #[error("{reader} cannot read \"{source_name}\": {reason}")]
    InvalidSource {
        reader: &'static str,
        source_name: String,
        reason: String,
    },

    /// Decoding, I/O or connection failure while reading a source
    #[error("Failed to read \"{source_name}\": {cause}")]
    SourceRead {
        source_name: String,
        #[source]
        cause: BoxError,
    },

    /// An axis column is absent from the table
    #[error("Column \"{column}\" not found (available: {})", .available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// No chart history record with this id
    #[error("Chart record {0} not found")]
    RecordNotFound(i64),

    /// Chart history storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Settings could not be loaded or saved
    #[error("Settings error: {0}")]
    Settings(String),

    /// Polars error outside of a source read
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

/// Coarse grouping of errors, used by callers to pick a recovery path
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Re-prompt for parameters
    Parameters,
    /// Pick a different source
    Source,
    /// Retry or change connection parameters
    Read,
    /// Pick different axis columns
    Column,
    /// History store problems
    Storage,
    Internal,
}

impl DataError {
    /// Wrap an underlying read failure for the given source
    pub fn read(source_name: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        DataError::SourceRead {
            source_name: source_name.into(),
            cause: cause.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DataError::MissingParameters { .. }
            | DataError::EmptyValue { .. }
            | DataError::TypeMismatch { .. }
            | DataError::InvalidParameter { .. } => ErrorCategory::Parameters,
            DataError::UnknownExtension { .. }
            | DataError::UnsupportedExtension { .. }
            | DataError::ReaderNotFound(_)
            | DataError::InvalidSource { .. } => ErrorCategory::Source,
            DataError::SourceRead { .. } => ErrorCategory::Read,
            DataError::ColumnNotFound { .. } => ErrorCategory::Column,
            DataError::RecordNotFound(_) | DataError::Storage(_) => ErrorCategory::Storage,
            DataError::Settings(_)
            | DataError::Polars(_)
            | DataError::Io(_)
            | DataError::Json(_) => ErrorCategory::Internal,
        }
    }
}

impl From<rusqlite::Error> for DataError {
    fn from(e: rusqlite::Error) -> Self {
        DataError::Storage(e.to_string())
    }
}
