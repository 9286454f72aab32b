//! Field validators for name, address, postcode, phone and email columns.
//!
//! Every cell-level function here is pure and idempotent: feeding a
//! validator its own output returns the same value.

use std::sync::LazyLock;

use polars::prelude::DataFrame;
use regex::Regex;
use scrub_model::{FieldKind, INVALID, UNKNOWN, VALID, VALID_POSTCODE_COLUMN};

use crate::data_utils::{column_values, replace_text_column, title_case};
use crate::error::Result;

/// UK postcode shape, e.g. `SW1A 1AA`, `M1 1AE`, `B33 8TH`.
static POSTCODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{1,2}\d[A-Z\d]? \d[A-Z]{2}$").expect("Invalid postcode regex")
});

/// Optional `+` then 10 to 15 digits.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{10,15}$").expect("Invalid phone regex"));

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("Invalid email regex"));

/// Outcome of a pattern check on one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellCheck {
    /// The normalized value matched.
    Valid(String),
    /// The value did not match and is replaced by the sentinel.
    Invalid,
}

impl CellCheck {
    pub fn is_invalid(&self) -> bool {
        matches!(self, CellCheck::Invalid)
    }

    /// The value written back to the table.
    pub fn into_value(self) -> String {
        match self {
            CellCheck::Valid(value) => value,
            CellCheck::Invalid => INVALID.to_string(),
        }
    }
}

/// Keep ASCII letters and whitespace, title-case and trim.
///
/// Missing input, the placeholder itself, and values with no letters left
/// all become "Unknown".
pub fn clean_name(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return UNKNOWN.to_string();
    };
    if raw.trim().is_empty() || raw == UNKNOWN {
        return UNKNOWN.to_string();
    }
    let kept: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_alphabetic() || ch.is_whitespace())
        .collect();
    let cleaned = title_case(&kept).trim().to_string();
    if cleaned.is_empty() {
        UNKNOWN.to_string()
    } else {
        cleaned
    }
}

/// Trim and title-case.
pub fn clean_address(value: &str) -> String {
    title_case(value.trim())
}

/// Uppercase and trim. No spaces are inserted.
pub fn normalize_postcode(value: &str) -> String {
    value.trim().to_uppercase()
}

pub fn is_valid_postcode(value: &str) -> bool {
    POSTCODE_REGEX.is_match(value)
}

pub fn check_phone(value: &str) -> CellCheck {
    let trimmed = value.trim();
    if PHONE_REGEX.is_match(trimmed) {
        CellCheck::Valid(trimmed.to_string())
    } else {
        CellCheck::Invalid
    }
}

pub fn check_email(value: &str) -> CellCheck {
    let trimmed = value.trim();
    if EMAIL_REGEX.is_match(trimmed) {
        CellCheck::Valid(trimmed.to_string())
    } else {
        CellCheck::Invalid
    }
}

/// Apply the text rule for `kind` to `column` in place.
///
/// Returns the number of cells flagged invalid. For postcodes this counts
/// non-null values marked "Invalid" in the added `Valid Postcode` column.
/// Date kinds are handled by the date normalizer and are a no-op here.
pub fn apply_field_rule(df: &mut DataFrame, column: &str, kind: FieldKind) -> Result<usize> {
    let values = column_values(df, column)?;
    let mut invalid = 0usize;

    match kind {
        FieldKind::Name => {
            let cleaned = values
                .iter()
                .map(|value| Some(clean_name(value.as_deref())))
                .collect();
            replace_text_column(df, column, cleaned)?;
        }
        FieldKind::Address => {
            let cleaned = values
                .iter()
                .map(|value| value.as_deref().map(clean_address))
                .collect();
            replace_text_column(df, column, cleaned)?;
        }
        FieldKind::Postcode => {
            let normalized: Vec<Option<String>> = values
                .iter()
                .map(|value| value.as_deref().map(normalize_postcode))
                .collect();
            let flags = normalized
                .iter()
                .map(|value| {
                    let valid = value.as_deref().is_some_and(is_valid_postcode);
                    if !valid && value.is_some() {
                        invalid += 1;
                    }
                    Some(if valid { VALID } else { INVALID }.to_string())
                })
                .collect();
            replace_text_column(df, column, normalized)?;
            replace_text_column(df, VALID_POSTCODE_COLUMN, flags)?;
        }
        FieldKind::Phone | FieldKind::Email => {
            let check: fn(&str) -> CellCheck = if kind == FieldKind::Phone {
                check_phone
            } else {
                check_email
            };
            let cleaned = values
                .iter()
                .map(|value| {
                    value.as_deref().map(|v| {
                        let outcome = check(v);
                        if outcome.is_invalid() {
                            invalid += 1;
                        }
                        outcome.into_value()
                    })
                })
                .collect();
            replace_text_column(df, column, cleaned)?;
        }
        FieldKind::BirthDate | FieldKind::Date => {}
    }

    Ok(invalid)
}
