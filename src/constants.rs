//! Application-wide constants.
//!
//! Centralizes parameter names, limits and defaults so readers, the file
//! manager and the settings layer agree on them.

// ============================================================================
// Global Chart Parameters
// ============================================================================

/// Parameter naming the column plotted along the X axis
pub const LABEL_COLUMN_FIELD: &str = "label_column";

/// Parameter naming the column plotted along the Y axis
pub const VALUE_COLUMN_FIELD: &str = "value_column";

/// Placeholder shown when a label is rendered without its parameter
pub const UNKNOWN_PLACEHOLDER: &str = "???";

// ============================================================================
// Source Resolution
// ============================================================================

/// File suffixes a user may pick, whether or not a reader exists for them.
///
/// `pickle` and `xlsx` are accepted in principle but have no reader, so they
/// resolve to `UnsupportedExtension` rather than `UnknownExtension`.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] =
    &["csv", "json", "arrow", "html", "xml", "db", "pickle", "xlsx"];

// ============================================================================
// Reading
// ============================================================================

/// Rows sampled when polars infers a CSV/JSON schema
pub const INFER_SCHEMA_ROWS: usize = 1000;

/// Rows sampled when inferring column types from text cells
pub const TYPE_INFERENCE_SAMPLE_ROWS: usize = 100;

/// Default connect timeout for remote databases, in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Charts
// ============================================================================

/// Default SVG width in pixels
pub const DEFAULT_CHART_WIDTH: u32 = 800;

/// Default SVG height in pixels
pub const DEFAULT_CHART_HEIGHT: u32 = 480;

/// Padding around the plot area in pixels
pub const CHART_PADDING: f64 = 48.0;

// ============================================================================
// Storage
// ============================================================================

/// Directory name used under the platform config/data dirs
pub const APP_DIR_NAME: &str = "tabplot";

/// File name of the settings file
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// File name of the chart history database
pub const HISTORY_FILE_NAME: &str = "history.db";
