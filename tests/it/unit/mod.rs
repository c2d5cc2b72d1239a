//! Unit tests for tabplot.

mod params_tests;
mod registry_tests;
mod settings_tests;
mod snapshot_tests;
