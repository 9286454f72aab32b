//! Logical type inference for loaded columns.
//!
//! Inference is conservative: a column becomes numeric only when every
//! non-empty cell is a plain decimal literal without a leading zero or sign
//! prefix, so identifiers such as `07123456789` or `+447123456789` stay text.

use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

use crate::polars_utils::format_numeric;

/// Logical type chosen for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// Returns true for literals like `42`, `-3`, `0.5` or `12.75`.
fn is_plain_number(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() {
        return false;
    }
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if int_part.len() > 1 && int_part.starts_with('0') {
        return false;
    }
    match frac_part {
        Some(frac) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

/// Infers the logical type of a column from its cells.
///
/// A column is `Integer` when every value fits an `i64` and `Float` when
/// every value is written back unchanged from its `f64` form. Anything that
/// would lose digits (values beyond `i64`, long decimals, trailing
/// fractional zeros) keeps the column as text. All-empty columns are text.
pub fn infer_kind(values: &[Option<String>]) -> ColumnKind {
    let mut non_null = 0usize;
    let mut integers = 0usize;
    for value in values.iter().flatten() {
        non_null += 1;
        if !is_plain_number(value) {
            return ColumnKind::Text;
        }
        if !value.contains('.') && value.parse::<i64>().is_ok() {
            integers += 1;
        } else if !round_trips_as_float(value) {
            return ColumnKind::Text;
        }
    }
    if non_null == 0 {
        ColumnKind::Text
    } else if integers == non_null {
        ColumnKind::Integer
    } else if values.iter().flatten().all(|value| round_trips_as_float(value)) {
        ColumnKind::Float
    } else {
        ColumnKind::Text
    }
}

fn round_trips_as_float(value: &str) -> bool {
    value
        .parse::<f64>()
        .is_ok_and(|parsed| format_numeric(parsed) == value)
}

/// Builds a typed column from raw cells.
pub fn build_column(name: &str, values: Vec<Option<String>>) -> Column {
    match infer_kind(&values) {
        ColumnKind::Integer => {
            let parsed: Vec<Option<i64>> = values
                .iter()
                .map(|value| value.as_deref().and_then(|v| v.parse::<i64>().ok()))
                .collect();
            Series::new(name.into(), parsed).into_column()
        }
        ColumnKind::Float => {
            let parsed: Vec<Option<f64>> = values
                .iter()
                .map(|value| value.as_deref().and_then(|v| v.parse::<f64>().ok()))
                .collect();
            Series::new(name.into(), parsed).into_column()
        }
        ColumnKind::Text => Series::new(name.into(), values).into_column(),
    }
}
