//! Batch cleaning for the `scrub` command-line tool.
//!
//! - **batch**: runs every input file through load, clean, write and sink
//! - **config**: TOML run configuration and command-line overrides
//! - **logging**: `tracing` subscriber setup and cell-value redaction
//! - **prompt**: the interactive `days_between` question
//! - **types**: batch results

pub mod batch;
pub mod config;
pub mod logging;
pub mod prompt;
pub mod types;
