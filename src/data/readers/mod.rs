//! Source readers: one implementation per source kind.
//!
//! Every reader is built from a source identifier and a [`Params`] mapping,
//! parses that mapping into its own config record at construction, checks the
//! identifier in [`SourceReader::validate_source`] and decodes the source into
//! a [`Table`] in [`SourceReader::read`].
//!
//! Local files are validated by suffix only, without touching the disk.
//! Remote engines only check that a dialect tag exists; whether the database
//! is reachable is discovered by `read()`.

mod arrow_reader;
mod csv_reader;
mod html_reader;
mod json_reader;
mod remote_reader;
mod sqlite_reader;
mod xml_reader;

pub use arrow_reader::ArrowReader;
pub use csv_reader::CsvReader;
pub use html_reader::HtmlReader;
pub use json_reader::JsonReader;
pub use remote_reader::{Dialect, RemoteConfig, RemoteReader};
pub use sqlite_reader::{SqliteConfig, SqliteReader};
pub use xml_reader::XmlReader;

use crate::constants::DEFAULT_CONNECT_TIMEOUT_SECS;
use crate::data::error::{DataError, DataResult};
use crate::data::params::{Params, ValidationPolicy};
use crate::data::table::Table;
use std::path::Path;
use std::time::Duration;

/// Capability set shared by all readers
pub trait SourceReader {
    /// Short display name of the source kind ("CSV", "PostgreSQL", ...)
    fn display_name(&self) -> &'static str;

    /// Check that the identifier fits this reader
    fn validate_source(&self) -> DataResult<()>;

    /// Decode the source into a table
    fn read(&self) -> DataResult<Table>;

    /// Label for history listings
    fn describe(&self) -> String;
}

/// How a reader is being constructed
#[derive(Clone, Debug)]
pub struct OpenOptions {
    /// Validate parameters against the reader schema. Off when the reader is
    /// only built to render its label.
    pub validate: bool,
    pub policy: ValidationPolicy,
    /// Connect timeout for remote engines
    pub connect_timeout: Option<Duration>,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            validate: true,
            policy: ValidationPolicy::default(),
            connect_timeout: Some(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
        }
    }
}

impl OpenOptions {
    /// Options for building a reader only to describe it
    pub fn describe_only() -> Self {
        Self {
            validate: false,
            ..Self::default()
        }
    }
}

/// Lower-cased trailing suffix of an identifier, if it has a `.`
pub fn suffix_of(identifier: &str) -> Option<String> {
    identifier
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Shared suffix check used by every local-file reader
pub(crate) fn check_suffix(reader: &'static str, path: &str, extension: &str) -> DataResult<()> {
    match suffix_of(path) {
        Some(ext) if ext == extension => Ok(()),
        _ => Err(DataError::InvalidSource {
            reader,
            source_name: path.to_string(),
            reason: format!("expected a .{} file", extension),
        }),
    }
}

/// Table name derived from a file path
pub(crate) fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Data")
        .to_string()
}

/// Text of a parameter, or the placeholder used in describe mode
pub(crate) fn text_or_placeholder(params: &Params, name: &str) -> String {
    params
        .get(name)
        .map(|v| v.to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| crate::constants::UNKNOWN_PLACEHOLDER.to_string())
}
