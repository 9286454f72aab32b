//! Record ingestion utilities.
//!
//! This crate discovers input CSV files and loads them into Polars
//! DataFrames with conservative logical type inference.
//!
//! # Features
//!
//! - **Discovery**: Expand file and directory inputs into an ordered file list
//! - **CSV Loading**: Header normalization, duplicate-label rejection, UTF-16 rejection
//! - **Type Inference**: Integer, float or text per column; leading-zero values stay text
//! - **AnyValue helpers**: String and date conversion shared by later stages
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use scrub_ingest::{collect_inputs, read_csv_table};
//!
//! let files = collect_inputs(&[PathBuf::from("data")])?;
//! for path in &files {
//!     let df = read_csv_table(path)?;
//! }
//! ```

mod csv;
mod discovery;
mod error;
pub mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    ColumnKind, infer_kind, normalize_cell, normalize_header, read_csv_table, validate_encoding,
};

// === File Discovery ===
pub use discovery::{base_directory, collect_inputs, list_csv_files};

// === AnyValue helpers ===
pub use polars_utils::{
    any_to_date, any_to_opt_string, any_to_string, date_to_days, days_to_date, format_numeric,
    parse_iso_date,
};
