use std::collections::BTreeSet;

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};
use scrub_ingest::any_to_opt_string;

use crate::error::Result;

const FIELD_SEPARATOR: char = '\u{1f}';
const NULL_MARKER: char = '\u{0}';

/// Composite key over every column of one row. Nulls are distinct from
/// empty strings.
fn row_key(df: &DataFrame, idx: usize) -> String {
    let mut composite = String::new();
    for (pos, column) in df.get_columns().iter().enumerate() {
        if pos > 0 {
            composite.push(FIELD_SEPARATOR);
        }
        match any_to_opt_string(column.get(idx).unwrap_or(AnyValue::Null)) {
            Some(value) => composite.push_str(&value),
            None => composite.push(NULL_MARKER),
        }
    }
    composite
}

/// Drop rows that duplicate an earlier row across every column.
///
/// The first occurrence survives and row order is preserved. Returns the
/// number of rows removed.
pub fn drop_duplicate_rows(df: &mut DataFrame) -> Result<usize> {
    if df.height() == 0 {
        return Ok(0);
    }
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        keep.push(seen.insert(row_key(df, idx)));
    }
    let removed = keep.iter().filter(|kept| !**kept).count();
    if removed == 0 {
        return Ok(0);
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    *df = df.filter(&mask)?;
    Ok(removed)
}
