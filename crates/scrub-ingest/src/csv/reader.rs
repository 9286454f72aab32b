//! CSV file reading into typed DataFrames.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::header::{normalize_cell, normalize_headers};
use super::infer::build_column;

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open(path)?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the first header label)
    Ok(())
}

/// Reads a CSV file into a DataFrame.
///
/// The first record is the header. Cells are trimmed and empty cells become
/// nulls; short rows are padded with nulls, rows longer than the header are
/// rejected. A row of blank cells (`,,`) is kept as an all-null row; only
/// fully empty lines are skipped. Column types are inferred per column (integer, float or text).
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;
    let file = open(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let raw_headers = reader.headers().map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if raw_headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let headers = normalize_headers(path, raw_headers.iter())?;

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if record.len() > headers.len() {
            return Err(IngestError::RaggedRow {
                path: path.to_path_buf(),
                line: record.position().map(|pos| pos.line()).unwrap_or(0),
                expected: headers.len(),
                found: record.len(),
            });
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(record.get(idx).and_then(normalize_cell));
        }
    }

    let built: Vec<Column> = headers
        .iter()
        .zip(columns)
        .map(|(name, values)| build_column(name, values))
        .collect();
    let df = DataFrame::new(built)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv table"
    );
    Ok(df)
}
