//! Data source reading and charting
//!
//! Everything between a source identifier and a chart object: parameter
//! schemas and validation, the reader family, the registry that maps
//! identifiers to readers, the common [`Table`] shape and the renderer.
//!
//! ## Flow
//!
//! identifier -> [`ReaderRegistry::resolve`] -> schema (reader fields plus
//! `label_column`/`value_column`) -> [`validate`] -> [`SourceReader::read`]
//! -> two named columns -> [`ChartRenderer::render`].
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! [`DataError::category`] tells a caller whether to re-prompt for
//! parameters, pick another source or retry the read.

mod chart_engine;
mod error;
mod file_manager;
mod infer;
mod params;
pub mod readers;
mod registry;
mod table;

pub use chart_engine::*;
pub use error::*;
pub use file_manager::*;
pub use infer::{columns_from_cells, rows_from_text};
pub use params::*;
pub use readers::{Dialect, OpenOptions, RemoteConfig, SourceReader, SqliteConfig, suffix_of};
pub use registry::*;
pub use table::*;
