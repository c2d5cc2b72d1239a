//! Single test binary entry point.
//!
//! Structure:
//! - integration: end-to-end flows from a source file to a chart and back
//!   out of history
//! - unit: single-component tests against the public API

mod unit;
