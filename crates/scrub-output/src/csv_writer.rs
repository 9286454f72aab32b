//! Cleaned CSV output.
//!
//! Files are written to a hidden temporary sibling and renamed into place
//! only after the last byte is flushed, so a table that fails mid-write
//! never leaves a partial `cleaned_` file behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame};
use scrub_ingest::any_to_string;

use crate::error::{OutputError, Result};

/// Prefix added to every cleaned file name.
pub const CLEANED_PREFIX: &str = "cleaned_";

/// `cleaned_<file name>` for a source path.
pub fn cleaned_file_name(source: &Path) -> String {
    let name = source
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("table.csv");
    format!("{CLEANED_PREFIX}{name}")
}

/// Full output path for a source file inside `output_dir`.
pub fn cleaned_output_path(output_dir: &Path, source: &Path) -> PathBuf {
    output_dir.join(cleaned_file_name(source))
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("output");
    path.with_file_name(format!(".{name}.tmp"))
}

/// Write `path` through a temporary file and rename on success.
///
/// The temporary file is removed if `write` fails.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let tmp = temp_path(path);
    let result = (|| {
        let file = File::create(&tmp).map_err(|source| OutputError::Write {
            path: tmp.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush().map_err(|source| OutputError::Write {
            path: tmp.clone(),
            source,
        })?;
        Ok(())
    })();

    if let Err(err) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(err);
    }

    std::fs::rename(&tmp, path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp);
        OutputError::Rename {
            from: tmp.clone(),
            to: path.to_path_buf(),
            source,
        }
    })
}

/// Write a cleaned table as comma-separated UTF-8 with a header row.
///
/// Nulls are written as empty cells and dates as `YYYY-MM-DD`.
pub fn write_cleaned_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let csv_error = |err: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    write_atomic(path, |out| {
        let mut writer = csv::Writer::from_writer(out);
        let columns = df.get_columns();
        writer
            .write_record(columns.iter().map(|column| column.name().as_str()))
            .map_err(csv_error)?;

        let mut record = Vec::with_capacity(columns.len());
        for idx in 0..df.height() {
            record.clear();
            for column in columns {
                record.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
            }
            writer.write_record(&record).map_err(csv_error)?;
        }
        writer.flush().map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    })?;

    tracing::debug!(path = %path.display(), rows = df.height(), "wrote cleaned csv");
    Ok(())
}
