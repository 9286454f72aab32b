//! DataFrame value extraction and small string helpers shared by the stages.

use polars::prelude::{AnyValue, DataFrame, IntoColumn, NamedFrom, Series};
use scrub_ingest::any_to_opt_string;

use crate::error::{Result, TransformError};

/// Read a column as optional strings, one entry per row.
///
/// Numbers are rendered without trailing zeros and dates as ISO text.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| TransformError::ColumnNotFound(name.to_string()))?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_opt_string(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Replace (or append) a text column, keeping its position.
pub fn replace_text_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<String>>,
) -> Result<()> {
    df.with_column(Series::new(name.into(), values).into_column())?;
    Ok(())
}

/// Strip one layer of wrapping double quotes from a string value.
///
/// Tripled quotes (`"""`) left by a double round of CSV quoting collapse to
/// one first. Always trims leading/trailing whitespace.
///
/// # Examples
///
/// ```
/// use scrub_transform::data_utils::strip_quotes;
///
/// assert_eq!(strip_quotes("\"05/03/1990\""), "05/03/1990");
/// assert_eq!(strip_quotes("  \"\"\"05/03/1990\"\"\"  "), "05/03/1990");
/// assert_eq!(strip_quotes("unquoted"), "unquoted");
/// assert_eq!(strip_quotes("\"partial"), "\"partial");
/// ```
pub fn strip_quotes(value: &str) -> String {
    let collapsed = value.trim().replace("\"\"\"", "\"");
    let trimmed = collapsed.as_str();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Title-case a value: the first letter after any non-letter is uppercased,
/// every other letter lowercased.
///
/// ```
/// use scrub_transform::data_utils::title_case;
///
/// assert_eq!(title_case("jOHN smith"), "John Smith");
/// assert_eq!(title_case("12b high st"), "12B High St");
/// ```
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_cased = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            out.push(if previous_cased {
                single_char(ch.to_lowercase()).unwrap_or(ch)
            } else {
                single_char(ch.to_uppercase()).unwrap_or(ch)
            });
            previous_cased = true;
        } else {
            out.push(ch);
            previous_cased = false;
        }
    }
    out
}

/// Case mappings that expand (`ß` to `SS`) leave the character unchanged so
/// a second pass gives the same text.
fn single_char(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    let first = mapped.next()?;
    mapped.next().is_none().then_some(first)
}
