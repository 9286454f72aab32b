//! Batch orchestration for `scrub clean`.
//!
//! Files are cleaned one after another. Anything that goes wrong inside a
//! file is caught here and recorded on that file's summary; the batch always
//! moves on to the next file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use polars::prelude::{AnyValue, DataFrame};
use tracing::{info, info_span, trace, warn};

use scrub_ingest::{any_to_string, base_directory, collect_inputs, read_csv_table};
use scrub_model::{CleaningOptions, CleaningSummary, RuleTable, ScrubError, TableStage};
use scrub_output::{
    SqliteSink, TableSink, cleaned_file_name, cleaned_output_path, table_name_for,
    write_cleaned_csv, write_cleaning_log,
};
use scrub_transform::clean_table;

use crate::logging::redact_value;
use crate::types::BatchResult;

/// Default output folder name, created inside the first input's directory.
pub const DEFAULT_OUTPUT_DIR: &str = "Cleaned";

/// Everything a batch needs, resolved from flags and configuration.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub inputs: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub rules: RuleTable,
    pub cleaning: CleaningOptions,
    pub sqlite: Option<PathBuf>,
    /// Clean and report without writing any file.
    pub dry_run: bool,
}

impl BatchOptions {
    pub fn new(inputs: Vec<PathBuf>, cleaning: CleaningOptions) -> Self {
        Self {
            inputs,
            output_dir: None,
            rules: RuleTable::default(),
            cleaning,
            sqlite: None,
            dry_run: false,
        }
    }

    /// `--output-dir`, or `<first input dir>/Cleaned`.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            base_directory(&self.inputs)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_OUTPUT_DIR)
        })
    }
}

/// Sink state for the batch. An unopenable database is reported against
/// every table instead of aborting the run.
enum SinkState {
    Disabled,
    Open(SqliteSink),
    Unavailable(String),
}

impl SinkState {
    fn open(path: Option<&Path>, dry_run: bool) -> Self {
        match path {
            None => Self::Disabled,
            Some(_) if dry_run => Self::Disabled,
            Some(path) => match SqliteSink::open(path) {
                Ok(sink) => Self::Open(sink),
                Err(err) => {
                    warn!(db = %path.display(), error = %err, "sqlite sink unavailable");
                    Self::Unavailable(err.to_string())
                }
            },
        }
    }

    fn write(&mut self, name: &Path, df: &DataFrame, summary: &mut CleaningSummary) {
        let table = table_name_for(name);
        let result = match self {
            Self::Disabled => return,
            Self::Open(sink) => sink.write_table(&table, df).map_err(|err| err.to_string()),
            Self::Unavailable(message) => Err(message.clone()),
        };
        match result {
            Ok(rows) => {
                info!(table = %table, rows, "sink table written");
                summary.sink_rows = Some(rows);
            }
            Err(message) => {
                let err = ScrubError::SinkWriteFailed { table, message };
                warn!(error = %err, "sink write failed");
                summary.sink_error = Some(err);
            }
        }
    }
}

/// Clean every input file and write the batch log.
///
/// # Errors
///
/// Only setup problems are errors: unreadable input directories, no CSV
/// files found, or a log artifact that cannot be written. Per-file failures,
/// including a named file that does not exist, are recorded on the returned
/// summaries.
pub fn run_batch(options: &BatchOptions) -> Result<BatchResult> {
    let files = collect_inputs(&options.inputs).context("collect input files")?;
    if files.is_empty() {
        bail!("no CSV files found in the given inputs");
    }
    let output_dir = options.resolved_output_dir();

    let batch_span = info_span!(
        "batch",
        files = files.len(),
        output_dir = %output_dir.display(),
        dry_run = options.dry_run
    );
    let _batch_guard = batch_span.enter();
    let start = Instant::now();

    let mut sink = SinkState::open(options.sqlite.as_deref(), options.dry_run);
    let names = output_names(&files);
    let mut tables = Vec::with_capacity(files.len());
    for (path, name) in files.iter().zip(&names) {
        tables.push(run_table(path, name, &output_dir, options, &mut sink));
    }

    let log_path = if options.dry_run {
        None
    } else {
        Some(write_cleaning_log(&output_dir, &tables).context("write cleaning log")?)
    };

    let failed = tables.iter().filter(|summary| summary.is_failed()).count();
    info!(
        cleaned = tables.len() - failed,
        failed,
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );

    Ok(BatchResult {
        output_dir,
        log_path,
        sqlite: options.sqlite.clone().filter(|_| !options.dry_run),
        dry_run: options.dry_run,
        tables,
    })
}

/// Name each file's outputs after it, adding `_2`, `_3`, ... to the stem when
/// an earlier file already claimed the same cleaned file or sink table.
fn output_names(files: &[PathBuf]) -> Vec<PathBuf> {
    let mut taken_files = HashSet::new();
    let mut taken_tables = HashSet::new();
    files
        .iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("table");
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("csv");
            let mut name = PathBuf::from(path.file_name().unwrap_or_default());
            let mut suffix = 1;
            loop {
                // Case-insensitive filesystems and SQLite both fold case.
                let file = cleaned_file_name(&name).to_lowercase();
                let table = table_name_for(&name);
                if !taken_files.contains(&file) && !taken_tables.contains(&table) {
                    taken_files.insert(file);
                    taken_tables.insert(table);
                    break;
                }
                suffix += 1;
                name = PathBuf::from(format!("{stem}_{suffix}.{extension}"));
            }
            if suffix > 1 {
                warn!(
                    source_file = %path.display(),
                    renamed = %name.display(),
                    "output name already used by an earlier file"
                );
            }
            name
        })
        .collect()
}

fn run_table(
    path: &Path,
    name: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    sink: &mut SinkState,
) -> CleaningSummary {
    let mut summary = CleaningSummary::new(path);
    let span = info_span!("table", source_file = %summary.file_name());
    let _guard = span.enter();
    let start = Instant::now();

    match clean_file(path, name, output_dir, options, &mut summary) {
        Ok(df) => {
            summary.advance(TableStage::Done);
            info!(
                rows_in = summary.input_rows,
                rows_out = summary.output_rows,
                duplicates = summary.duplicates_removed,
                filled = summary.missing_filled,
                issues = summary.cell_issue_count(),
                duration_ms = start.elapsed().as_millis(),
                "table cleaned"
            );
            sink.write(name, &df, &mut summary);
        }
        Err(err) => {
            warn!(stage = %summary.stage, error = %err, "table failed");
            summary.fail(err.to_string());
        }
    }
    summary
}

fn clean_file(
    path: &Path,
    name: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    summary: &mut CleaningSummary,
) -> Result<DataFrame> {
    let df = read_csv_table(path)?;
    summary.advance(TableStage::Loaded);

    let df = clean_table(df, &options.rules, &options.cleaning, summary)?;
    trace!(row = %redact_value(&first_row(&df)), "first cleaned row");

    if !options.dry_run {
        let output = cleaned_output_path(output_dir, name);
        write_cleaned_csv(&df, &output)?;
        summary.output_path = Some(output);
    }
    Ok(df)
}

fn first_row(df: &DataFrame) -> String {
    if df.height() == 0 {
        return String::new();
    }
    df.get_columns()
        .iter()
        .map(|column| any_to_string(column.get(0).unwrap_or(AnyValue::Null)))
        .collect::<Vec<_>>()
        .join(", ")
}
