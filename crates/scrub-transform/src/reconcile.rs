//! Missing-value reconciliation.
//!
//! Runs last. Numeric nulls become 0, date nulls stay null, every other null
//! becomes "Unknown". Existing values, including "Invalid", are never touched.

use polars::prelude::{DataFrame, DataType, FillNullStrategy, IntoColumn};
use scrub_model::UNKNOWN;

use crate::data_utils::{column_values, replace_text_column};
use crate::error::Result;

/// How a column's nulls are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    Zero,
    KeepNull,
    Unknown,
}

pub fn fill_rule(dtype: &DataType) -> FillRule {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => FillRule::Zero,
        DataType::Date => FillRule::KeepNull,
        _ => FillRule::Unknown,
    }
}

/// Fill nulls in every column except `exempt`. Returns the number of cells
/// filled.
pub fn fill_missing(df: &mut DataFrame, exempt: &[&str]) -> Result<usize> {
    let targets: Vec<(String, FillRule, usize)> = df
        .get_columns()
        .iter()
        .filter(|column| !exempt.contains(&column.name().as_str()))
        .map(|column| {
            (
                column.name().to_string(),
                fill_rule(column.dtype()),
                column.null_count(),
            )
        })
        .filter(|(_, _, nulls)| *nulls > 0)
        .collect();

    let mut filled = 0usize;
    for (name, rule, nulls) in targets {
        match rule {
            FillRule::KeepNull => continue,
            FillRule::Zero => {
                let series = df
                    .column(&name)?
                    .as_materialized_series()
                    .fill_null(FillNullStrategy::Zero)?;
                df.with_column(series.into_column())?;
            }
            FillRule::Unknown => {
                let values = column_values(df, &name)?
                    .into_iter()
                    .map(|value| Some(value.unwrap_or_else(|| UNKNOWN.to_string())))
                    .collect();
                replace_text_column(df, &name, values)?;
            }
        }
        filled += nulls;
    }
    Ok(filled)
}
