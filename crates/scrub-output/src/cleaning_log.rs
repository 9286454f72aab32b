//! Batch log artifact (`cleaning_log.txt`).

use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use scrub_model::{CleaningSummary, StageIssue};

use crate::csv_writer::write_atomic;
use crate::error::{OutputError, Result};

/// File name of the log artifact inside the output directory.
pub const CLEANING_LOG_FILE: &str = "cleaning_log.txt";

fn issue_line(issue: &StageIssue) -> String {
    let mut line = format!("{}", issue.kind);
    if let Some(role) = issue.role {
        let _ = write!(line, " {role}");
    }
    if let Some(column) = &issue.column {
        let _ = write!(line, " [{column}]");
    }
    let _ = write!(line, ": {}", issue.count);
    if let Some(detail) = &issue.detail {
        let _ = write!(line, " ({detail})");
    }
    line
}

/// Render the log section for one table.
pub fn render_summary(summary: &CleaningSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File: {}", summary.file_name());
    let _ = writeln!(out, "  Status: {}", summary.stage);
    let _ = writeln!(
        out,
        "  Original columns: {}",
        if summary.original_columns.is_empty() {
            "(none)".to_string()
        } else {
            summary.original_columns.join(", ")
        }
    );
    if !summary.resolved.is_empty() {
        let pairs: Vec<String> = summary
            .resolved
            .iter()
            .map(|(role, column)| format!("{role} -> {column}"))
            .collect();
        let _ = writeln!(out, "  Resolved roles: {}", pairs.join(", "));
    }
    if !summary.is_failed() {
        let _ = writeln!(
            out,
            "  Rows: {} in, {} out",
            summary.input_rows, summary.output_rows
        );
    }
    let _ = writeln!(out, "  Duplicates removed: {}", summary.duplicates_removed);
    let _ = writeln!(out, "  Missing values filled: {}", summary.missing_filled);
    if summary.issues.is_empty() {
        let _ = writeln!(out, "  Issues: none");
    } else {
        let _ = writeln!(out, "  Issues:");
        for issue in &summary.issues {
            let _ = writeln!(out, "    {}", issue_line(issue));
        }
    }
    if let Some(path) = &summary.output_path {
        let _ = writeln!(out, "  Output: {}", path.display());
    }
    match (&summary.sink_rows, &summary.sink_error) {
        (_, Some(err)) => {
            let _ = writeln!(out, "  Sink: {err}");
        }
        (Some(rows), None) => {
            let _ = writeln!(out, "  Sink: {rows} rows written");
        }
        (None, None) => {}
    }
    if let Some(failure) = &summary.failure {
        let _ = writeln!(out, "  Failure: {failure}");
    }
    out
}

/// Render the whole log for a batch.
pub fn render_log(summaries: &[CleaningSummary]) -> String {
    let failed = summaries.iter().filter(|s| s.is_failed()).count();
    let mut out = String::new();
    let _ = writeln!(out, "Cleaning log");
    let _ = writeln!(
        out,
        "Files: {}, cleaned: {}, failed: {}",
        summaries.len(),
        summaries.len() - failed,
        failed
    );
    for summary in summaries {
        out.push('\n');
        out.push_str(&render_summary(summary));
    }
    out
}

/// Write `cleaning_log.txt` into `output_dir` and return its path.
pub fn write_cleaning_log(output_dir: &Path, summaries: &[CleaningSummary]) -> Result<PathBuf> {
    let path = output_dir.join(CLEANING_LOG_FILE);
    let text = render_log(summaries);
    write_atomic(&path, |out| {
        out.write_all(text.as_bytes())
            .map_err(|source| OutputError::Write {
                path: path.clone(),
                source,
            })
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrub_model::{IssueKind, Role, TableStage};

    fn cleaned_summary() -> CleaningSummary {
        let mut summary = CleaningSummary::new("data/members.csv");
        summary.original_columns = vec![
            "Full Name".to_string(),
            "DOB".to_string(),
            "Phone".to_string(),
        ];
        summary.resolved = vec![
            (Role::FullName, "Full Name".to_string()),
            (Role::Phone, "Phone".to_string()),
            (Role::BirthDate, "DOB".to_string()),
        ];
        summary.input_rows = 4;
        summary.output_rows = 3;
        summary.duplicates_removed = 1;
        summary.missing_filled = 2;
        summary.record_issue(IssueKind::FormatInvalid, Some(Role::Phone), Some("Phone"), 2);
        summary.record_unresolved(Role::ReturnDate, "required for days_between");
        summary.sink_rows = Some(3);
        summary.advance(TableStage::Done);
        summary
    }

    fn failed_summary() -> CleaningSummary {
        let mut summary = CleaningSummary::new("data/broken.csv");
        summary.fail("line 3 has 4 fields, header has 2");
        summary
    }

    #[test]
    fn test_render_log() {
        let log = render_log(&[cleaned_summary(), failed_summary()]);
        insta::assert_snapshot!(log, @r"
        Cleaning log
        Files: 2, cleaned: 1, failed: 1

        File: members.csv
          Status: done
          Original columns: Full Name, DOB, Phone
          Resolved roles: full_name -> Full Name, phone -> Phone, birth_date -> DOB
          Rows: 4 in, 3 out
          Duplicates removed: 1
          Missing values filled: 2
          Issues:
            FormatInvalid phone [Phone]: 2
            RoleUnresolved return_date: 1 (required for days_between)
          Sink: 3 rows written

        File: broken.csv
          Status: failed
          Original columns: (none)
          Duplicates removed: 0
          Missing values filled: 0
          Issues: none
          Failure: broken.csv: processing failed after stage pending: line 3 has 4 fields, header has 2
        ");
    }
}
