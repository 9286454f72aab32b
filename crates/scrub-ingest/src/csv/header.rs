//! CSV header normalization.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Normalizes a header label: trims, strips a UTF-8 BOM and collapses inner
/// whitespace runs to a single space.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Normalizes a data cell. Empty cells become `None`.
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes a header record and checks labels are non-empty and unique.
pub fn normalize_headers<'a>(
    path: &Path,
    raw: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();
    let mut headers = Vec::new();
    for (position, value) in raw.into_iter().enumerate() {
        let label = normalize_header(value);
        if label.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                position: position + 1,
            });
        }
        if !seen.insert(label.clone()) {
            return Err(IngestError::DuplicateColumn {
                path: path.to_path_buf(),
                column: label,
            });
        }
        headers.push(label);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Date   of  Birth "), "Date of Birth");
        assert_eq!(normalize_header("\u{feff}Full Name"), "Full Name");
        assert_eq!(normalize_header("DOB"), "DOB");
    }

    #[test]
    fn test_normalize_cell() {
        assert_eq!(normalize_cell("  john "), Some("john".to_string()));
        assert_eq!(normalize_cell("   "), None);
    }

    #[test]
    fn test_duplicate_headers_rejected() {
        let result = normalize_headers(Path::new("x.csv"), ["Email", " Email "]);
        assert!(matches!(
            result,
            Err(IngestError::DuplicateColumn { column, .. }) if column == "Email"
        ));
    }

    #[test]
    fn test_empty_header_rejected() {
        let result = normalize_headers(Path::new("x.csv"), ["Name", ""]);
        assert!(matches!(
            result,
            Err(IngestError::EmptyColumnName { position: 2, .. })
        ));
    }
}
