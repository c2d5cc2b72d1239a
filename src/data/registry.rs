//! Static registration table of source readers
//!
//! File readers are keyed by lower-cased suffix, remote readers by dialect
//! tag. The table is built once per process; [`ReaderRegistry::builtin`]
//! returns the shared instance.

use crate::constants::DEFAULT_ALLOWED_EXTENSIONS;
use crate::data::error::{DataError, DataResult};
use crate::data::params::{ParameterSchema, Params};
use crate::data::readers::{
    ArrowReader, CsvReader, Dialect, HtmlReader, JsonReader, OpenOptions, RemoteConfig,
    RemoteReader, SourceReader, SqliteConfig, SqliteReader, XmlReader, suffix_of,
};
use once_cell::sync::Lazy;

/// Builds a reader from an identifier, its parameters and open options
pub type ReaderFactory = fn(&str, &Params, &OpenOptions) -> DataResult<Box<dyn SourceReader>>;

/// One registered reader
#[derive(Clone, Copy)]
pub struct ReaderEntry {
    /// Suffix or dialect tag
    pub key: &'static str,
    pub display_name: &'static str,
    /// Extra parameters the reader needs
    pub schema: fn() -> ParameterSchema,
    pub open: ReaderFactory,
}

impl std::fmt::Debug for ReaderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderEntry")
            .field("key", &self.key)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

static BUILTIN: Lazy<ReaderRegistry> = Lazy::new(ReaderRegistry::with_builtin_readers);

/// Maps source identifiers to reader entries
#[derive(Clone, Debug)]
pub struct ReaderRegistry {
    file_readers: Vec<ReaderEntry>,
    database_readers: Vec<ReaderEntry>,
    allowed_extensions: Vec<String>,
}

impl ReaderRegistry {
    /// Shared registry with every builtin reader and the default allow-list
    pub fn builtin() -> &'static ReaderRegistry {
        &BUILTIN
    }

    fn with_builtin_readers() -> Self {
        let file_readers = vec![
            ReaderEntry {
                key: CsvReader::EXTENSION,
                display_name: CsvReader::DISPLAY_NAME,
                schema: ParameterSchema::empty,
                open: open_csv,
            },
            ReaderEntry {
                key: JsonReader::EXTENSION,
                display_name: JsonReader::DISPLAY_NAME,
                schema: ParameterSchema::empty,
                open: open_json,
            },
            ReaderEntry {
                key: ArrowReader::EXTENSION,
                display_name: ArrowReader::DISPLAY_NAME,
                schema: ParameterSchema::empty,
                open: open_arrow,
            },
            ReaderEntry {
                key: HtmlReader::EXTENSION,
                display_name: HtmlReader::DISPLAY_NAME,
                schema: ParameterSchema::empty,
                open: open_html,
            },
            ReaderEntry {
                key: XmlReader::EXTENSION,
                display_name: XmlReader::DISPLAY_NAME,
                schema: ParameterSchema::empty,
                open: open_xml,
            },
            ReaderEntry {
                key: SqliteReader::EXTENSION,
                display_name: SqliteReader::DISPLAY_NAME,
                schema: SqliteConfig::schema,
                open: open_sqlite,
            },
        ];

        let database_readers = Dialect::ALL
            .iter()
            .map(|dialect| ReaderEntry {
                key: dialect.tag(),
                display_name: dialect.display_name(),
                schema: RemoteConfig::schema,
                open: open_remote,
            })
            .collect();

        Self {
            file_readers,
            database_readers,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Copy of the builtin registry with a different allow-list
    pub fn with_allowed_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_extensions: extensions
                .into_iter()
                .map(|s| s.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
            ..Self::with_builtin_readers()
        }
    }

    /// Find the reader for a source identifier
    pub fn resolve(&self, identifier: &str) -> DataResult<&ReaderEntry> {
        if let Some(entry) = self.database_readers.iter().find(|e| e.key == identifier) {
            return Ok(entry);
        }

        let Some(extension) = suffix_of(identifier) else {
            return Err(DataError::UnknownExtension {
                extension: String::new(),
                allowed: self.allowed_extensions.clone(),
            });
        };

        if !self.allowed_extensions.contains(&extension) {
            return Err(DataError::UnknownExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        let supported = self.supported_extensions();
        if !supported.contains(&extension.as_str()) {
            return Err(DataError::UnsupportedExtension {
                extension,
                supported: supported.iter().map(|s| s.to_string()).collect(),
            });
        }

        self.lookup(&extension)
            .ok_or(DataError::ReaderNotFound(extension))
    }

    /// Entry registered under an exact key, file or database
    pub fn lookup(&self, key: &str) -> Option<&ReaderEntry> {
        self.file_readers
            .iter()
            .chain(self.database_readers.iter())
            .find(|e| e.key == key)
    }

    /// Allow-listed suffixes that also have a reader
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        self.file_readers
            .iter()
            .map(|e| e.key)
            .filter(|key| self.allowed_extensions.iter().any(|a| a == key))
            .collect()
    }

    /// Remote engines offered in a source picker
    pub fn database_readers(&self) -> &[ReaderEntry] {
        &self.database_readers
    }

    pub fn file_readers(&self) -> &[ReaderEntry] {
        &self.file_readers
    }

    /// Suffixes offered in a file picker
    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::with_builtin_readers()
    }
}

fn checked(reader: impl SourceReader + 'static) -> DataResult<Box<dyn SourceReader>> {
    reader.validate_source()?;
    Ok(Box::new(reader))
}

fn open_csv(path: &str, _: &Params, _: &OpenOptions) -> DataResult<Box<dyn SourceReader>> {
    checked(CsvReader::new(path))
}

fn open_json(path: &str, _: &Params, _: &OpenOptions) -> DataResult<Box<dyn SourceReader>> {
    checked(JsonReader::new(path))
}

fn open_arrow(path: &str, _: &Params, _: &OpenOptions) -> DataResult<Box<dyn SourceReader>> {
    checked(ArrowReader::new(path))
}

fn open_html(path: &str, _: &Params, _: &OpenOptions) -> DataResult<Box<dyn SourceReader>> {
    checked(HtmlReader::new(path))
}

fn open_xml(path: &str, _: &Params, _: &OpenOptions) -> DataResult<Box<dyn SourceReader>> {
    checked(XmlReader::new(path))
}

fn open_sqlite(
    path: &str,
    params: &Params,
    options: &OpenOptions,
) -> DataResult<Box<dyn SourceReader>> {
    let config = SqliteConfig::from_params(params, options)?;
    checked(SqliteReader::new(path, config))
}

fn open_remote(
    tag: &str,
    params: &Params,
    options: &OpenOptions,
) -> DataResult<Box<dyn SourceReader>> {
    let dialect = Dialect::from_tag(tag).ok_or_else(|| DataError::ReaderNotFound(tag.to_string()))?;
    let config = RemoteConfig::from_params(params, options)?;
    checked(RemoteReader::new(dialect, config, options.connect_timeout))
}
