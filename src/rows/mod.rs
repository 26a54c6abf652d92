//! Row files: one record per labelled span, coerced into typed rows.
//!
//! This layer checks shape (required fields, cell types) only. Whether a row
//! makes sense against a document is decided in `placement`.

pub mod cell;
pub mod generate;
pub mod parse;
pub mod row;

pub use generate::generate_rows_file;
pub use parse::parse_rows_file;
pub use row::{RowSpec, SpacePattern, StartNum};
