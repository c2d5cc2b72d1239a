//! tabplot: line charts from tabular sources.
//!
//! Files (CSV, JSON, Arrow IPC, HTML tables, XML, SQLite) and remote SQL
//! tables (PostgreSQL, MySQL, MariaDB) are read into a common [`data::Table`],
//! two of its columns become a [`data::LineChart`], and every successful chart
//! is kept in a [`history::ChartStore`] for later regeneration.

pub mod constants;
pub mod data;
pub mod history;
pub mod settings;
pub mod types;
pub mod workbench;
