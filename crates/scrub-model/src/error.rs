use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::summary::TableStage;

/// Failures that end processing of one table or one sink write.
///
/// Per-cell problems (bad formats, unparseable dates, out-of-range ages,
/// unresolved roles) are not errors; they are counted as
/// [`IssueKind`](crate::IssueKind)s on the table summary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ScrubError {
    #[error("{source_file}: processing failed after stage {stage}: {message}")]
    TableProcessingFailed {
        source_file: String,
        stage: TableStage,
        message: String,
    },
    #[error("sink write failed for table {table}: {message}")]
    SinkWriteFailed { table: String, message: String },
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    #[error("invalid age bounds: min {min} is greater than max {max}")]
    InvalidAgeBounds { min: i32, max: i32 },
}

pub type Result<T> = std::result::Result<T, ScrubError>;
