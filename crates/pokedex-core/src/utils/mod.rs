//! Utility functions for string formatting.

pub mod format;

pub use format::{capitalize, format_measure, truncate_string};
