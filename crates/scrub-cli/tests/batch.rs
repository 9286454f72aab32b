//! End-to-end batch runs over temporary CSV files.

use std::fs;
use std::path::{Path, PathBuf};

use scrub_cli::batch::{BatchOptions, DEFAULT_OUTPUT_DIR, run_batch};
use scrub_cli::types::TableOutcome;
use scrub_model::{CleaningOptions, ScrubError, TableStage};
use scrub_output::SqliteSink;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn options(inputs: Vec<PathBuf>) -> BatchOptions {
    BatchOptions::new(inputs, CleaningOptions::new(2024))
}

#[test]
fn malformed_file_fails_and_batch_continues() {
    let dir = TempDir::new().unwrap();
    let broken = write_file(dir.path(), "broken.csv", "a,b\n1,2\n3,4,5,6\n");
    let members = write_file(
        dir.path(),
        "members.csv",
        "Full Name,DOB,Phone\njohn smith,05/03/1990,12345\n",
    );

    let result = run_batch(&options(vec![broken, members])).unwrap();

    assert_eq!(result.tables.len(), 2);
    assert_eq!(result.failed_count(), 1);
    assert_eq!(result.output_dir, dir.path().join(DEFAULT_OUTPUT_DIR));

    let outcomes: Vec<_> = result.outcomes().collect();
    let (broken_summary, broken_outcome) = &outcomes[0];
    assert_eq!(broken_summary.file_name(), "broken.csv");
    assert_eq!(broken_summary.stage, TableStage::Failed);
    match broken_outcome {
        TableOutcome::Failed(ScrubError::TableProcessingFailed {
            source_file, stage, ..
        }) => {
            assert_eq!(source_file, "broken.csv");
            assert_eq!(*stage, TableStage::Pending);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(!result.output_dir.join("cleaned_broken.csv").exists());

    let (members_summary, _) = &outcomes[1];
    assert!(members_summary.is_done());
    let cleaned = fs::read_to_string(result.output_dir.join("cleaned_members.csv")).unwrap();
    assert_eq!(cleaned, "Full Name,DOB,Phone\nJohn Smith,1990-03-05,Invalid\n");

    let log_path = result.log_path.clone().unwrap();
    let log = fs::read_to_string(log_path).unwrap();
    assert!(log.contains("Files: 2, cleaned: 1, failed: 1"));
    assert!(log.contains("File: broken.csv"));
    assert!(log.contains("Failure: broken.csv: processing failed after stage pending"));
    assert!(log.contains("Original columns: Full Name, DOB, Phone"));
}

#[test]
fn directory_input_uses_cleaned_subfolder() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "b.csv", "Email\nann@example.com\n");
    write_file(dir.path(), "a.CSV", "Email\nnot-an-email\n");
    write_file(dir.path(), "notes.txt", "ignored");

    let result = run_batch(&options(vec![dir.path().to_path_buf()])).unwrap();

    let names: Vec<String> = result.tables.iter().map(|s| s.file_name()).collect();
    assert_eq!(names, ["a.CSV", "b.csv"]);
    let cleaned_dir = dir.path().join(DEFAULT_OUTPUT_DIR);
    assert_eq!(
        fs::read_to_string(cleaned_dir.join("cleaned_a.CSV")).unwrap(),
        "Email\nInvalid\n"
    );
    assert_eq!(
        fs::read_to_string(cleaned_dir.join("cleaned_b.csv")).unwrap(),
        "Email\nann@example.com\n"
    );
    assert!(!result.has_failures());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "members.csv", "Full Name\nann lee\nANN LEE\n");
    let mut opts = options(vec![input]);
    opts.dry_run = true;
    opts.sqlite = Some(dir.path().join("cleaned.db"));

    let result = run_batch(&opts).unwrap();

    assert!(result.log_path.is_none());
    assert!(result.sqlite.is_none());
    assert!(!dir.path().join(DEFAULT_OUTPUT_DIR).exists());
    assert!(!dir.path().join("cleaned.db").exists());
    let summary = &result.tables[0];
    assert!(summary.is_done());
    assert!(summary.output_path.is_none());
    assert_eq!(summary.duplicates_removed, 1);
}

#[test]
fn days_between_is_added_when_enabled() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "loans.csv",
        "Book checkout,Book Returned\n01/02/2024,15/02/2024\n",
    );
    let mut opts = options(vec![input]);
    opts.cleaning = opts.cleaning.clone().with_days_between(true);
    opts.output_dir = Some(dir.path().join("out"));

    let result = run_batch(&opts).unwrap();

    let cleaned = fs::read_to_string(dir.path().join("out/cleaned_loans.csv")).unwrap();
    assert_eq!(
        cleaned,
        "Book checkout,Book Returned,days_between\n2024-02-01,2024-02-15,14\n"
    );
    assert_eq!(result.output_dir, dir.path().join("out"));
}

#[test]
fn sqlite_sink_loads_cleaned_tables() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "Members 2024.csv", "Full Name\nann lee\nbob\n");
    let db = dir.path().join("cleaned.db");
    let mut opts = options(vec![input]);
    opts.sqlite = Some(db.clone());

    let result = run_batch(&opts).unwrap();

    let summary = &result.tables[0];
    assert_eq!(summary.sink_rows, Some(2));
    assert!(summary.sink_error.is_none());
    assert!(db.exists());
    assert_eq!(result.sqlite.as_deref(), Some(db.as_path()));
}

#[test]
fn unavailable_sink_does_not_fail_the_table() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "members.csv", "Full Name\nann lee\n");
    let mut opts = options(vec![input]);
    opts.sqlite = Some(dir.path().join("missing").join("cleaned.db"));

    let result = run_batch(&opts).unwrap();

    let summary = &result.tables[0];
    assert!(summary.is_done());
    assert!(summary.output_path.as_ref().unwrap().exists());
    match &summary.sink_error {
        Some(ScrubError::SinkWriteFailed { table, .. }) => assert_eq!(table, "members"),
        other => panic!("expected sink failure, got {other:?}"),
    }
    assert!(!result.has_failures());
}

#[test]
fn no_csv_inputs_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "readme.txt", "nothing here");
    let err = run_batch(&options(vec![dir.path().to_path_buf()])).unwrap_err();
    assert!(err.to_string().contains("no CSV files"));
}

#[test]
fn missing_file_fails_only_that_table() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("gone.csv");
    let members = write_file(dir.path(), "members.csv", "Full Name\nann lee\n");

    let result = run_batch(&options(vec![gone, members])).unwrap();

    assert_eq!(result.tables.len(), 2);
    assert_eq!(result.failed_count(), 1);
    let outcomes: Vec<_> = result.outcomes().collect();
    match &outcomes[0].1 {
        TableOutcome::Failed(ScrubError::TableProcessingFailed {
            source_file,
            message,
            ..
        }) => {
            assert_eq!(source_file, "gone.csv");
            assert!(message.contains("not found"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(outcomes[1].0.is_done());
    assert_eq!(
        fs::read_to_string(result.output_dir.join("cleaned_members.csv")).unwrap(),
        "Full Name\nAnn Lee\n"
    );
}

#[test]
fn same_file_name_in_two_folders_gets_distinct_outputs() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    let first = write_file(&dir.path().join("a"), "m.csv", "Full Name\nann lee\n");
    let second = write_file(&dir.path().join("b"), "m.csv", "Full Name\nbob\ncat\n");
    let db = dir.path().join("cleaned.db");
    let mut opts = options(vec![first, second]);
    opts.output_dir = Some(dir.path().join("out"));
    opts.sqlite = Some(db.clone());

    let result = run_batch(&opts).unwrap();

    assert!(!result.has_failures());
    let out = dir.path().join("out");
    assert_eq!(
        result.tables[0].output_path.as_deref(),
        Some(out.join("cleaned_m.csv").as_path())
    );
    assert_eq!(
        result.tables[1].output_path.as_deref(),
        Some(out.join("cleaned_m_2.csv").as_path())
    );
    assert_eq!(
        fs::read_to_string(out.join("cleaned_m.csv")).unwrap(),
        "Full Name\nAnn Lee\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("cleaned_m_2.csv")).unwrap(),
        "Full Name\nBob\nCat\n"
    );

    let sink = SqliteSink::open(&db).unwrap();
    let count = |table: &str| -> i64 {
        sink.connection()
            .query_row(
                &format!("SELECT COUNT(*) FROM \"{table}\""),
                [],
                |row| row.get(0),
            )
            .unwrap()
    };
    assert_eq!(count("m"), 1);
    assert_eq!(count("m_2"), 2);
}
