//! Relational sink for cleaned tables.
//!
//! The batch talks to the sink through [`TableSink`]; [`SqliteSink`] is the
//! only implementation. Each cleaned file becomes one table named from its
//! sanitized file stem, replaced on every run.

use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame, DataType};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use scrub_ingest::any_to_string;

use crate::error::SinkError;

/// Destination for cleaned tables.
pub trait TableSink {
    /// Write `df` as table `name`, replacing any previous table of that name.
    /// Returns the number of rows written.
    fn write_table(&mut self, name: &str, df: &DataFrame) -> Result<usize, SinkError>;
}

/// Sanitize a file stem into a SQL table name.
///
/// Lowercase ASCII alphanumerics; runs of anything else collapse to one
/// underscore. A leading digit gets a `t_` prefix; an empty result becomes
/// `cleaned_table`.
pub fn sanitize_table_name(raw: &str) -> String {
    let mut safe = String::with_capacity(raw.len());
    let mut last_was_underscore = true;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            safe.push(ch.to_ascii_lowercase());
            last_was_underscore = false;
        } else if !last_was_underscore {
            safe.push('_');
            last_was_underscore = true;
        }
    }

    if safe.ends_with('_') {
        safe.pop();
    }

    if safe.is_empty() {
        return "cleaned_table".to_string();
    }

    if safe.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        safe.insert_str(0, "t_");
    }

    safe
}

/// Table name for a source file.
pub fn table_name_for(source: &Path) -> String {
    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("");
    sanitize_table_name(stem)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn sql_type(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => "INTEGER",
        DataType::Float32 | DataType::Float64 => "REAL",
        _ => "TEXT",
    }
}

fn sql_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Int8(v) => Value::Integer(i64::from(v)),
        AnyValue::Int16(v) => Value::Integer(i64::from(v)),
        AnyValue::Int32(v) => Value::Integer(i64::from(v)),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::UInt8(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt16(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt32(v) => Value::Integer(i64::from(v)),
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Float64(v) => Value::Real(v),
        // Dates are stored as ISO text.
        other => Value::Text(any_to_string(other)),
    }
}

/// SQLite database sink.
pub struct SqliteSink {
    path: PathBuf,
    conn: Connection,
}

impl SqliteSink {
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let conn = Connection::open(path).map_err(|source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, SinkError> {
        let conn = Connection::open_in_memory().map_err(|source| SinkError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn replace_table(&mut self, name: &str, df: &DataFrame) -> rusqlite::Result<usize> {
        let table = quote_identifier(name);
        let columns = df.get_columns();
        let definitions: Vec<String> = columns
            .iter()
            .map(|column| {
                format!(
                    "{} {}",
                    quote_identifier(column.name().as_str()),
                    sql_type(column.dtype())
                )
            })
            .collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|idx| format!("?{idx}")).collect();

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table}; CREATE TABLE {table} ({});",
            definitions.join(", ")
        ))?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} VALUES ({})",
                placeholders.join(", ")
            ))?;
            for idx in 0..df.height() {
                let row = columns
                    .iter()
                    .map(|column| sql_value(column.get(idx).unwrap_or(AnyValue::Null)));
                stmt.execute(params_from_iter(row))?;
            }
        }
        tx.commit()?;
        Ok(df.height())
    }
}

impl TableSink for SqliteSink {
    fn write_table(&mut self, name: &str, df: &DataFrame) -> Result<usize, SinkError> {
        let rows = self
            .replace_table(name, df)
            .map_err(|source| SinkError::Write {
                table: name.to_string(),
                source,
            })?;
        tracing::debug!(table = name, rows, db = %self.path.display(), "sink table written");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_table_name() {
        assert_eq!(sanitize_table_name("Library Members (2024)"), "library_members_2024");
        assert_eq!(sanitize_table_name("2024-books"), "t_2024_books");
        assert_eq!(sanitize_table_name("---"), "cleaned_table");
        assert_eq!(table_name_for(Path::new("/x/Members.csv")), "members");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("Full Name"), "\"Full Name\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
