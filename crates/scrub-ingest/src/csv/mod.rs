//! CSV reading utilities.

mod header;
mod infer;
mod reader;

pub use header::{normalize_cell, normalize_header};
pub use infer::{ColumnKind, infer_kind};
pub use reader::{read_csv_table, validate_encoding};
