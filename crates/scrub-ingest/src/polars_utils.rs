//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue` types,
//! including string rendering and date conversion.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Days between 0001-01-01 (chrono's CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types and renders
/// dates as ISO `YYYY-MM-DD`.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        AnyValue::Date(days) => days_to_date(days)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Converts AnyValue to String, returning None for nulls.
pub fn any_to_opt_string(value: AnyValue<'_>) -> Option<String> {
    if value.is_null() {
        None
    } else {
        Some(any_to_string(value))
    }
}

/// Formats a floating-point number without trailing fractional zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Converts a calendar date to Polars' physical `Date` value (days since epoch).
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Converts Polars' physical `Date` value back to a calendar date.
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Reads a date from a `Date` cell or an ISO `YYYY-MM-DD` text cell.
pub fn any_to_date(value: AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Date(days) => days_to_date(days),
        AnyValue::String(s) => parse_iso_date(s),
        AnyValue::StringOwned(s) => parse_iso_date(&s),
        _ => None,
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numeric_keeps_integer_zeros() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(2.50), "2.5");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn test_epoch_round_trip() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_days(epoch), 0);
        let date = NaiveDate::from_ymd_opt(1990, 3, 5).unwrap();
        assert_eq!(days_to_date(date_to_days(date)), Some(date));
    }

    #[test]
    fn test_any_to_string_date() {
        let date = NaiveDate::from_ymd_opt(1990, 3, 5).unwrap();
        assert_eq!(any_to_string(AnyValue::Date(date_to_days(date))), "1990-03-05");
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_opt_string(AnyValue::Null), None);
    }

    #[test]
    fn test_any_to_date_accepts_iso_text() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(any_to_date(AnyValue::String("2023-12-31")), Some(date));
        assert_eq!(any_to_date(AnyValue::String("31/12/2023")), None);
        assert_eq!(any_to_date(AnyValue::Int64(5)), None);
    }
}
