//! Output for cleaned tables.
//!
//! - **csv_writer**: `cleaned_<file>` CSV output, written atomically
//! - **cleaning_log**: the per-batch `cleaning_log.txt` artifact
//! - **sink**: the relational sink interface and its SQLite implementation

pub mod cleaning_log;
pub mod csv_writer;
pub mod error;
pub mod sink;

pub use cleaning_log::{CLEANING_LOG_FILE, render_log, render_summary, write_cleaning_log};
pub use csv_writer::{
    CLEANED_PREFIX, cleaned_file_name, cleaned_output_path, write_cleaned_csv,
};
pub use error::{OutputError, Result, SinkError};
pub use sink::{SqliteSink, TableSink, sanitize_table_name, table_name_for};
