//! Day-first date normalization and the birth-date age check.
//!
//! Only values shaped like `D/M/YYYY` (one or two digit day and month) are
//! parsed; every other shape passes through untouched so that already
//! normalized or free-text values are never destroyed.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use polars::prelude::{AnyValue, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use regex::Regex;
use scrub_ingest::{any_to_date, any_to_opt_string, date_to_days};
use scrub_model::AgeBounds;

use crate::data_utils::{column_values, replace_text_column, strip_quotes};
use crate::error::{Result, TransformError};

static DAY_FIRST_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("Invalid day-first date regex")
});

/// Outcome of normalizing one date cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCell {
    /// Day-first value that is a real calendar date.
    Parsed(NaiveDate),
    /// Any other shape, quotes stripped, otherwise unchanged.
    PassThrough(String),
    /// Day-first shape but not a calendar date (e.g. `31/02/2020`).
    Unparseable,
}

/// Normalize one raw date cell.
pub fn normalize_date(value: &str) -> DateCell {
    let stripped = strip_quotes(value);
    if !DAY_FIRST_SHAPE.is_match(&stripped) {
        return DateCell::PassThrough(stripped);
    }
    match NaiveDate::parse_from_str(&stripped, "%d/%m/%Y") {
        Ok(date) => DateCell::Parsed(date),
        Err(_) => DateCell::Unparseable,
    }
}

/// Counts produced by normalizing one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateColumnReport {
    pub parsed: usize,
    pub passed_through: usize,
    pub unparseable: usize,
}

/// Normalize a date column in place.
///
/// If no value passes through, the column becomes a `Date` column;
/// otherwise it stays text and parsed values are written as `YYYY-MM-DD`.
/// A column that is already `Date` is left alone.
pub fn normalize_date_column(df: &mut DataFrame, column: &str) -> Result<DateColumnReport> {
    let source = df
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound(column.to_string()))?;
    if source.dtype() == &DataType::Date {
        return Ok(DateColumnReport::default());
    }

    let mut report = DateColumnReport::default();
    let mut cells = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let raw = any_to_opt_string(source.get(idx).unwrap_or(AnyValue::Null));
        let cell = raw.as_deref().map(normalize_date);
        match &cell {
            Some(DateCell::Parsed(_)) => report.parsed += 1,
            Some(DateCell::PassThrough(_)) => report.passed_through += 1,
            Some(DateCell::Unparseable) => report.unparseable += 1,
            None => {}
        }
        cells.push(cell);
    }

    if report.passed_through == 0 {
        let dates = cells
            .into_iter()
            .map(|cell| match cell {
                Some(DateCell::Parsed(date)) => Some(date),
                _ => None,
            })
            .collect();
        replace_date_column(df, column, dates)?;
    } else {
        let text = cells
            .into_iter()
            .map(|cell| match cell {
                Some(DateCell::Parsed(date)) => Some(date.format("%Y-%m-%d").to_string()),
                Some(DateCell::PassThrough(value)) => Some(value),
                Some(DateCell::Unparseable) | None => None,
            })
            .collect();
        replace_text_column(df, column, text)?;
    }

    Ok(report)
}

/// Read a column as dates. `Date` cells and ISO text cells yield a date;
/// everything else yields `None`.
pub fn date_values(df: &DataFrame, column: &str) -> Result<Vec<Option<NaiveDate>>> {
    let source = df
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound(column.to_string()))?;
    Ok((0..df.height())
        .map(|idx| any_to_date(source.get(idx).unwrap_or(AnyValue::Null)))
        .collect())
}

/// Replace (or append) a `Date` column.
pub fn replace_date_column(
    df: &mut DataFrame,
    column: &str,
    dates: Vec<Option<NaiveDate>>,
) -> Result<()> {
    let days: Vec<Option<i32>> = dates.into_iter().map(|d| d.map(date_to_days)).collect();
    let series = Series::new(column.into(), days).cast(&DataType::Date)?;
    df.with_column(series.into_column())?;
    Ok(())
}

/// `reference_year - birth_year`, checked against the inclusive bounds.
pub fn age_in_range(birth: NaiveDate, reference_year: i32, bounds: &AgeBounds) -> bool {
    bounds.contains(reference_year - birth.year())
}

/// Null every birth date whose age falls outside `bounds`.
///
/// Works on `Date` columns and on text columns holding ISO dates; other
/// text is left alone. Returns the number of cells nulled.
pub fn apply_age_bounds(
    df: &mut DataFrame,
    column: &str,
    reference_year: i32,
    bounds: &AgeBounds,
) -> Result<usize> {
    let dates = date_values(df, column)?;
    let out_of_range: Vec<bool> = dates
        .iter()
        .map(|date| date.is_some_and(|d| !age_in_range(d, reference_year, bounds)))
        .collect();
    let nulled = out_of_range.iter().filter(|flag| **flag).count();
    if nulled == 0 {
        return Ok(0);
    }

    let is_date = df
        .column(column)
        .map(|c| c.dtype() == &DataType::Date)
        .unwrap_or(false);
    if is_date {
        let kept = dates
            .into_iter()
            .zip(&out_of_range)
            .map(|(date, drop)| if *drop { None } else { date })
            .collect();
        replace_date_column(df, column, kept)?;
    } else {
        let values = column_values(df, column)?;
        let kept = values
            .into_iter()
            .zip(&out_of_range)
            .map(|(value, drop)| if *drop { None } else { value })
            .collect();
        replace_text_column(df, column, kept)?;
    }

    Ok(nulled)
}
