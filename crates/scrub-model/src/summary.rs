//! Per-table cleaning summary.
//!
//! A [`CleaningSummary`] is created when a file is picked up, updated by every
//! stage, and finalized when the table reaches [`TableStage::Done`] or fails.
//! It is the only thing the batch caller sees about a table besides the
//! output file itself.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScrubError;
use crate::role::Role;

/// Lifecycle of one table through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableStage {
    /// Picked up, not yet read.
    Pending,
    Loaded,
    RoleResolved,
    Validated,
    Deduplicated,
    Reconciled,
    Done,
    Failed,
}

impl TableStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStage::Pending => "pending",
            TableStage::Loaded => "loaded",
            TableStage::RoleResolved => "role-resolved",
            TableStage::Validated => "validated",
            TableStage::Deduplicated => "deduplicated",
            TableStage::Reconciled => "reconciled",
            TableStage::Done => "done",
            TableStage::Failed => "failed",
        }
    }
}

impl fmt::Display for TableStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Non-fatal problems counted during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// A role's aliases matched no usable column; its stage was skipped.
    RoleUnresolved,
    /// A cell failed its validator pattern and was replaced by "Invalid".
    FormatInvalid,
    /// A date-shaped cell was not a calendar date and was nulled.
    DateUnparseable,
    /// A birth date implied an age outside the configured bounds and was nulled.
    AgeOutOfRange,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::RoleUnresolved => "RoleUnresolved",
            IssueKind::FormatInvalid => "FormatInvalid",
            IssueKind::DateUnparseable => "DateUnparseable",
            IssueKind::AgeOutOfRange => "AgeOutOfRange",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One counted issue, aggregated per (kind, role, column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageIssue {
    pub kind: IssueKind,
    pub role: Option<Role>,
    pub column: Option<String>,
    pub count: usize,
    pub detail: Option<String>,
}

/// Counters and outcome for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub source_file: PathBuf,
    pub original_columns: Vec<String>,
    pub resolved: Vec<(Role, String)>,
    pub input_rows: usize,
    pub output_rows: usize,
    pub duplicates_removed: usize,
    pub missing_filled: usize,
    pub issues: Vec<StageIssue>,
    pub stage: TableStage,
    pub output_path: Option<PathBuf>,
    pub sink_rows: Option<usize>,
    pub sink_error: Option<ScrubError>,
    pub failure: Option<ScrubError>,
}

impl CleaningSummary {
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            original_columns: Vec::new(),
            resolved: Vec::new(),
            input_rows: 0,
            output_rows: 0,
            duplicates_removed: 0,
            missing_filled: 0,
            issues: Vec::new(),
            stage: TableStage::Pending,
            output_path: None,
            sink_rows: None,
            sink_error: None,
            failure: None,
        }
    }

    /// File name used in reports ("unknown" when the path has none).
    pub fn file_name(&self) -> String {
        file_name(&self.source_file)
    }

    pub fn advance(&mut self, stage: TableStage) {
        self.stage = stage;
    }

    /// Mark the table failed, keeping the last stage reached in the cause.
    pub fn fail(&mut self, message: impl Into<String>) {
        let stage = self.stage;
        self.failure = Some(ScrubError::TableProcessingFailed {
            source_file: self.file_name(),
            stage,
            message: message.into(),
        });
        self.stage = TableStage::Failed;
        self.output_path = None;
    }

    pub fn is_failed(&self) -> bool {
        self.stage == TableStage::Failed
    }

    pub fn is_done(&self) -> bool {
        self.stage == TableStage::Done
    }

    /// Add `count` occurrences of an issue, merging with an existing entry
    /// for the same kind, role and column.
    pub fn record_issue(
        &mut self,
        kind: IssueKind,
        role: Option<Role>,
        column: Option<&str>,
        count: usize,
    ) {
        if count == 0 {
            return;
        }
        if let Some(existing) = self
            .issues
            .iter_mut()
            .find(|issue| issue.kind == kind && issue.role == role && issue.column.as_deref() == column)
        {
            existing.count += count;
            return;
        }
        self.issues.push(StageIssue {
            kind,
            role,
            column: column.map(str::to_string),
            count,
            detail: None,
        });
    }

    /// Record an unresolved role with a human-readable reason.
    pub fn record_unresolved(&mut self, role: Role, detail: impl Into<String>) {
        self.issues.push(StageIssue {
            kind: IssueKind::RoleUnresolved,
            role: Some(role),
            column: None,
            count: 1,
            detail: Some(detail.into()),
        });
    }

    /// Total occurrences of `kind` across columns.
    pub fn issue_count(&self, kind: IssueKind) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind == kind)
            .map(|issue| issue.count)
            .sum()
    }

    /// Total of all per-cell issues (unresolved roles excluded).
    pub fn cell_issue_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind != IssueKind::RoleUnresolved)
            .map(|issue| issue.count)
            .sum()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_merge_per_column() {
        let mut summary = CleaningSummary::new("people.csv");
        summary.record_issue(IssueKind::FormatInvalid, Some(Role::Phone), Some("Tel"), 2);
        summary.record_issue(IssueKind::FormatInvalid, Some(Role::Phone), Some("Tel"), 3);
        summary.record_issue(IssueKind::FormatInvalid, Some(Role::Email), Some("Email"), 1);
        summary.record_issue(IssueKind::AgeOutOfRange, Some(Role::BirthDate), Some("DOB"), 0);
        assert_eq!(summary.issues.len(), 2);
        assert_eq!(summary.issue_count(IssueKind::FormatInvalid), 6);
        assert_eq!(summary.issue_count(IssueKind::AgeOutOfRange), 0);
    }

    #[test]
    fn fail_keeps_last_stage_in_cause() {
        let mut summary = CleaningSummary::new("/data/people.csv");
        summary.advance(TableStage::Validated);
        summary.output_path = Some(PathBuf::from("/out/cleaned_people.csv"));
        summary.fail("disk full");
        assert!(summary.is_failed());
        assert!(summary.output_path.is_none());
        assert_eq!(
            summary.failure.as_ref().unwrap().to_string(),
            "people.csv: processing failed after stage validated: disk full"
        );
    }

    #[test]
    fn stages_are_ordered() {
        assert!(TableStage::Loaded < TableStage::RoleResolved);
        assert!(TableStage::Reconciled < TableStage::Done);
    }
}
