use polars::prelude::*;
use scrub_output::{
    CLEANING_LOG_FILE, SqliteSink, TableSink, cleaned_output_path, write_cleaned_csv,
    write_cleaning_log,
};
use scrub_model::{CleaningSummary, TableStage};
use tempfile::TempDir;

/// 1990-03-05 as days since the Unix epoch.
const DOB_1990_03_05: i32 = 7368;

fn sample_frame() -> DataFrame {
    let dob = Series::new("DOB".into(), vec![Some(DOB_1990_03_05), None])
        .cast(&DataType::Date)
        .unwrap();
    DataFrame::new(vec![
        Series::new("Full Name".into(), vec![Some("John Smith"), Some("Ann, Lee")]).into_column(),
        dob.into_column(),
        Series::new("Books".into(), vec![Some(2i64), Some(0)]).into_column(),
    ])
    .unwrap()
}

#[test]
fn writes_cleaned_csv_with_iso_dates_and_quoting() {
    let dir = TempDir::new().unwrap();
    let path = cleaned_output_path(&dir.path().join("Cleaned"), "members.csv".as_ref());
    write_cleaned_csv(&sample_frame(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "Full Name,DOB,Books\nJohn Smith,1990-03-05,2\n\"Ann, Lee\",,0\n"
    );
    let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn sqlite_sink_replaces_table_and_stores_dates_as_text() {
    let mut sink = SqliteSink::open_in_memory().unwrap();
    let df = sample_frame();
    assert_eq!(sink.write_table("members", &df).unwrap(), 2);
    // Second write replaces rather than appends.
    assert_eq!(sink.write_table("members", &df).unwrap(), 2);

    let conn = sink.connection();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
    let dob: String = conn
        .query_row(
            "SELECT \"DOB\" FROM members WHERE \"Full Name\" = 'John Smith'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(dob, "1990-03-05");
    let books: i64 = conn
        .query_row("SELECT SUM(\"Books\") FROM members", [], |row| row.get(0))
        .unwrap();
    assert_eq!(books, 2);
}

#[test]
fn sqlite_sink_writes_to_file() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cleaned.db");
    let mut sink = SqliteSink::open(&db).unwrap();
    sink.write_table("books", &sample_frame()).unwrap();
    drop(sink);
    assert!(db.exists());
}

#[test]
fn cleaning_log_is_written_to_output_dir() {
    let dir = TempDir::new().unwrap();
    let mut summary = CleaningSummary::new("members.csv");
    summary.advance(TableStage::Done);
    let path = write_cleaning_log(dir.path(), &[summary]).unwrap();
    assert_eq!(path, dir.path().join(CLEANING_LOG_FILE));
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.starts_with("Cleaning log\nFiles: 1, cleaned: 1, failed: 0\n"));
    assert!(text.contains("File: members.csv"));
}
