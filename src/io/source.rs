//! Source loading: URL or path to an in-memory table of untrusted strings.
//!
//! No type coercion happens here. The loader only guarantees that a header row
//! exists and that every returned row came out of the CSV reader intact.

use std::path::Path;

use csv::StringRecord;
use reqwest::blocking::Client;

use crate::error::InsightError;

/// Raw, untyped CSV contents.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Header names, trimmed, BOM removed.
    pub headers: Vec<String>,
    /// Data rows in source order.
    pub rows: Vec<StringRecord>,
    /// Data rows the CSV reader could not decode (dropped).
    pub unreadable_rows: usize,
}

impl RawTable {
    /// Index of a header by exact (case-sensitive) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Rows seen in the payload, including unreadable ones.
    pub fn rows_read(&self) -> usize {
        self.rows.len() + self.unreadable_rows
    }
}

/// Load a CSV table from a URL (`http://`, `https://`), a `file://` URL, or a
/// filesystem path.
pub fn load_table(location: &str) -> Result<RawTable, InsightError> {
    let location = location.trim();
    let payload = if is_remote(location) {
        fetch_remote(location)?
    } else {
        let path = location.strip_prefix("file://").unwrap_or(location);
        read_local(Path::new(path))?
    };
    parse_table(&payload)
}

/// Parse delimited text into a `RawTable`.
pub fn parse_table(payload: &str) -> Result<RawTable, InsightError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(payload.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| InsightError::SourceUnavailable(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect::<Vec<_>>();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(InsightError::SourceUnavailable(
            "CSV payload has no header row.".to_string(),
        ));
    }

    let mut rows = Vec::new();
    let mut unreadable_rows = 0usize;
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record),
            Err(e) => {
                tracing::debug!("dropping unreadable CSV row: {e}");
                unreadable_rows += 1;
            }
        }
    }

    Ok(RawTable {
        headers,
        rows,
        unreadable_rows,
    })
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn fetch_remote(url: &str) -> Result<String, InsightError> {
    let resp = Client::new()
        .get(url)
        .send()
        .map_err(|e| InsightError::SourceUnavailable(format!("Failed to fetch CSV '{url}': {e}")))?;

    if !resp.status().is_success() {
        return Err(InsightError::SourceUnavailable(format!(
            "Failed to fetch CSV '{url}': HTTP status {}.",
            resp.status()
        )));
    }

    resp.text()
        .map_err(|e| InsightError::SourceUnavailable(format!("Failed to read CSV body from '{url}': {e}")))
}

fn read_local(path: &Path) -> Result<String, InsightError> {
    std::fs::read_to_string(path).map_err(|e| {
        InsightError::SourceUnavailable(format!("Failed to open CSV '{}': {e}", path.display()))
    })
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim_start_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_trimmed_and_bom_stripped() {
        let table = parse_table("\u{feff}Date , Units_Sold,  Price\n2024-01-05,10,11.5\n").unwrap();
        assert_eq!(table.headers, vec!["Date", "Units_Sold", "Price"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.column_index("Price"), Some(2));
        assert_eq!(table.column_index("price"), None);
    }

    #[test]
    fn empty_payload_is_unavailable() {
        let err = parse_table("").unwrap_err();
        assert!(matches!(err, InsightError::SourceUnavailable(_)));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = load_table("/definitely/not/here/sales.csv").unwrap_err();
        assert!(matches!(err, InsightError::SourceUnavailable(_)));
        assert!(err.to_string().contains("sales.csv"));
    }

    #[test]
    fn short_rows_are_kept_for_the_cleaner() {
        let table = parse_table("Date,Units_Sold,Price\n2024-01-05,10\n").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows_read(), 1);
    }
}
