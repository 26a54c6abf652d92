//! Typed failures raised by the row model and the placement engine.
//!
//! Everything else (I/O, PDF parsing) travels as `anyhow::Error` with context.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Header row lacks one or more required field names.
    #[error("bad header names in row file: missing {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("field `{field}` cannot hold value {value:?}: expected {expected}")]
    BadCell {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("row {row} targets page {page}, but the document has {page_count} page(s)")]
    PageOutOfRange {
        row: usize,
        page: usize,
        page_count: usize,
    },

    #[error("row {row} asks for {count} labels; at least 1 is required")]
    NonPositiveCount { row: usize, count: i64 },

    #[error("row {row} pushes the line number past {}", i64::MAX)]
    NumberOverflow { row: usize },

    #[error("{0}")]
    BadArgument(String),
}
