//! End-to-end tests for the per-table cleaning pipeline.

use chrono::NaiveDate;
use polars::prelude::*;
use scrub_ingest::any_to_date;
use scrub_model::{
    CleaningOptions, CleaningSummary, DAYS_BETWEEN_COLUMN, IssueKind, Role, RuleTable,
    TableStage, VALID_POSTCODE_COLUMN,
};
use scrub_transform::clean_table;

fn df_from(cols: &[(&str, &[Option<&str>])]) -> DataFrame {
    let columns: Vec<Column> = cols
        .iter()
        .map(|(name, values)| Series::new((*name).into(), values.to_vec()).into_column())
        .collect();
    DataFrame::new(columns).unwrap()
}

fn run(df: DataFrame, options: &CleaningOptions) -> (DataFrame, CleaningSummary) {
    let mut summary = CleaningSummary::new("members.csv");
    summary.advance(TableStage::Loaded);
    let cleaned = clean_table(df, &RuleTable::default(), options, &mut summary).unwrap();
    (cleaned, summary)
}

fn text(df: &DataFrame, column: &str, idx: usize) -> Option<String> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .get(idx)
        .map(str::to_string)
}

fn date(df: &DataFrame, column: &str, idx: usize) -> Option<NaiveDate> {
    any_to_date(df.column(column).unwrap().get(idx).unwrap())
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn name_dob_phone_scenario() {
    let df = df_from(&[
        ("Full Name", &[Some("john smith")]),
        ("DOB", &[Some("05/03/1990")]),
        ("Phone", &[Some("12345")]),
    ]);
    let (cleaned, summary) = run(df, &CleaningOptions::new(2024));

    assert_eq!(text(&cleaned, "Full Name", 0).as_deref(), Some("John Smith"));
    assert_eq!(cleaned.column("DOB").unwrap().dtype(), &DataType::Date);
    assert_eq!(date(&cleaned, "DOB", 0), Some(ymd(1990, 3, 5)));
    assert_eq!(text(&cleaned, "Phone", 0).as_deref(), Some("Invalid"));

    assert_eq!(summary.stage, TableStage::Reconciled);
    assert_eq!(summary.issue_count(IssueKind::FormatInvalid), 1);
    assert_eq!(
        summary.resolved,
        vec![
            (Role::FullName, "Full Name".to_string()),
            (Role::Phone, "Phone".to_string()),
            (Role::BirthDate, "DOB".to_string()),
        ]
    );
}

#[test]
fn numeric_phone_column_is_validated_as_text() {
    let df = DataFrame::new(vec![
        Series::new("Tel".into(), vec![Some(12345i64), None]).into_column(),
    ])
    .unwrap();
    let (cleaned, summary) = run(df, &CleaningOptions::new(2024));
    assert_eq!(cleaned.column("Tel").unwrap().dtype(), &DataType::String);
    assert_eq!(text(&cleaned, "Tel", 0).as_deref(), Some("Invalid"));
    assert_eq!(text(&cleaned, "Tel", 1).as_deref(), Some("Unknown"));
    assert_eq!(summary.missing_filled, 1);
}

#[test]
fn age_bounds_with_reference_year() {
    let df = df_from(&[
        ("Name", &[Some("a"), Some("b"), Some("c")]),
        (
            "Date of Birth",
            &[Some("01/06/1995"), Some("01/01/2023"), Some("01/01/2024")],
        ),
    ]);
    let (cleaned, summary) = run(df, &CleaningOptions::new(2024));
    assert_eq!(date(&cleaned, "Date of Birth", 0), Some(ymd(1995, 6, 1)));
    assert_eq!(date(&cleaned, "Date of Birth", 1), Some(ymd(2023, 1, 1)));
    assert_eq!(date(&cleaned, "Date of Birth", 2), None);
    assert_eq!(summary.issue_count(IssueKind::AgeOutOfRange), 1);
    // Date nulls are never filled.
    assert_eq!(summary.missing_filled, 0);
}

#[test]
fn mixed_date_column_keeps_pass_through_values() {
    let df = df_from(&[(
        "Join Date",
        &[Some("05/03/1990"), Some("1990-03-05"), Some("31/02/2020"), None],
    )]);
    let (cleaned, summary) = run(df, &CleaningOptions::new(2024));
    assert_eq!(cleaned.column("Join Date").unwrap().dtype(), &DataType::String);
    assert_eq!(text(&cleaned, "Join Date", 0).as_deref(), Some("1990-03-05"));
    assert_eq!(text(&cleaned, "Join Date", 1).as_deref(), Some("1990-03-05"));
    assert_eq!(summary.issue_count(IssueKind::DateUnparseable), 1);
    // Text-typed column: nulls reconcile to Unknown.
    assert_eq!(text(&cleaned, "Join Date", 2).as_deref(), Some("Unknown"));
    assert_eq!(text(&cleaned, "Join Date", 3).as_deref(), Some("Unknown"));
}

#[test]
fn rows_equal_after_normalization_collapse() {
    let df = df_from(&[
        ("Full Name", &[Some("john smith"), Some("JOHN SMITH"), Some("ann lee")]),
        ("Email", &[Some("j@x.com"), Some(" j@x.com "), Some("a@x.com")]),
    ]);
    let (cleaned, summary) = run(df, &CleaningOptions::new(2024));
    assert_eq!(cleaned.height(), 2);
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(text(&cleaned, "Full Name", 1).as_deref(), Some("Ann Lee"));
}

#[test]
fn zero_duplicate_table_is_unchanged_in_length() {
    let df = df_from(&[("Address", &[Some("1 high st"), Some("2 low rd")])]);
    let (cleaned, summary) = run(df, &CleaningOptions::new(2024));
    assert_eq!(cleaned.height(), 2);
    assert_eq!(summary.duplicates_removed, 0);
    assert_eq!(text(&cleaned, "Address", 0).as_deref(), Some("1 High St"));
}

#[test]
fn postcode_validity_column_is_added() {
    let df = df_from(&[("Post Code", &[Some(" ab1 2cd "), Some("12345"), None])]);
    let (cleaned, summary) = run(df, &CleaningOptions::new(2024));
    assert_eq!(text(&cleaned, "Post Code", 0).as_deref(), Some("AB1 2CD"));
    assert_eq!(text(&cleaned, VALID_POSTCODE_COLUMN, 0).as_deref(), Some("Valid"));
    assert_eq!(text(&cleaned, VALID_POSTCODE_COLUMN, 1).as_deref(), Some("Invalid"));
    assert_eq!(text(&cleaned, VALID_POSTCODE_COLUMN, 2).as_deref(), Some("Invalid"));
    assert_eq!(summary.issue_count(IssueKind::FormatInvalid), 1);
}

#[test]
fn days_between_derived_when_enabled() {
    let df = df_from(&[
        ("Book checkout", &[Some("01/01/2024"), Some("10/01/2024")]),
        ("Book Returned", &[Some("15/01/2024"), None]),
    ]);
    let options = CleaningOptions::new(2024).with_days_between(true);
    let (cleaned, _) = run(df, &options);
    let days = cleaned.column(DAYS_BETWEEN_COLUMN).unwrap().i64().unwrap();
    assert_eq!(days.get(0), Some(14));
    assert_eq!(days.get(1), None);
}

#[test]
fn days_between_reports_unresolved_role() {
    let df = df_from(&[("Book checkout", &[Some("01/01/2024")])]);
    let options = CleaningOptions::new(2024).with_days_between(true);
    let (cleaned, summary) = run(df, &options);
    assert!(cleaned.column(DAYS_BETWEEN_COLUMN).is_err());
    assert_eq!(summary.issue_count(IssueKind::RoleUnresolved), 1);
    assert_eq!(summary.issues[0].role, Some(Role::ReturnDate));
}

#[test]
fn unrelated_columns_pass_through_and_reconcile() {
    let df = DataFrame::new(vec![
        Series::new("Books".into(), vec![Some(3i64), None]).into_column(),
        Series::new("Notes".into(), vec![None, Some("late")]).into_column(),
    ])
    .unwrap();
    let (cleaned, summary) = run(df, &CleaningOptions::new(2024));
    assert_eq!(cleaned.column("Books").unwrap().i64().unwrap().get(1), Some(0));
    assert_eq!(text(&cleaned, "Notes", 0).as_deref(), Some("Unknown"));
    assert_eq!(summary.missing_filled, 2);
    assert!(summary.resolved.is_empty());
}
