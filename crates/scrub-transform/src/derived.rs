//! Derived fields computed from resolved date columns.

use chrono::NaiveDate;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use scrub_model::DAYS_BETWEEN_COLUMN;

use crate::datetime::date_values;
use crate::error::Result;

/// Whole days from `start` to `end`, per row. Null when either side is null.
pub fn days_between(start: &[Option<NaiveDate>], end: &[Option<NaiveDate>]) -> Vec<Option<i64>> {
    start
        .iter()
        .zip(end)
        .map(|(start, end)| match (start, end) {
            (Some(start), Some(end)) => Some(end.signed_duration_since(*start).num_days()),
            _ => None,
        })
        .collect()
}

/// Append the `days_between` column (return minus checkout).
///
/// Returns the number of rows where the value could not be computed.
pub fn add_days_between(
    df: &mut DataFrame,
    checkout_column: &str,
    return_column: &str,
) -> Result<usize> {
    let checkout = date_values(df, checkout_column)?;
    let returned = date_values(df, return_column)?;
    let values = days_between(&checkout, &returned);
    let missing = values.iter().filter(|value| value.is_none()).count();
    df.with_column(Series::new(DAYS_BETWEEN_COLUMN.into(), values).into_column())?;
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_days_between() {
        let start = [ymd(2024, 1, 1), ymd(2024, 2, 28), None, ymd(2024, 3, 10)];
        let end = [ymd(2024, 1, 15), ymd(2024, 3, 1), ymd(2024, 1, 1), ymd(2024, 3, 1)];
        assert_eq!(
            days_between(&start, &end),
            vec![Some(14), Some(2), None, Some(-9)]
        );
    }
}
