use std::path::{Path, PathBuf};

use scrub_model::{CleaningSummary, ScrubError};

/// Result of one `scrub clean` run.
#[derive(Debug)]
pub struct BatchResult {
    pub output_dir: PathBuf,
    /// `None` in dry-run mode.
    pub log_path: Option<PathBuf>,
    pub sqlite: Option<PathBuf>,
    pub dry_run: bool,
    pub tables: Vec<CleaningSummary>,
}

/// What happened to one input file.
#[derive(Debug, Clone, Copy)]
pub enum TableOutcome<'a> {
    /// Cleaned; `output` is `None` in dry-run mode.
    Cleaned { output: Option<&'a Path> },
    Failed(&'a ScrubError),
}

impl BatchResult {
    pub fn outcomes(&self) -> impl Iterator<Item = (&CleaningSummary, TableOutcome<'_>)> {
        self.tables.iter().map(|summary| (summary, outcome(summary)))
    }

    pub fn failed_count(&self) -> usize {
        self.tables.iter().filter(|summary| summary.is_failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    /// Cleaned output files written by this run.
    pub fn outputs(&self) -> Vec<&Path> {
        self.tables
            .iter()
            .filter_map(|summary| summary.output_path.as_deref())
            .collect()
    }
}

fn outcome(summary: &CleaningSummary) -> TableOutcome<'_> {
    match &summary.failure {
        Some(failure) => TableOutcome::Failed(failure),
        None => TableOutcome::Cleaned {
            output: summary.output_path.as_deref(),
        },
    }
}
