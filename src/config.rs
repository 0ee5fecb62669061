//! Extraction settings.
//!
//! The defaults describe the AWS statement layout the parser was built for.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Result;

/// Phrase that identifies the statement title.
pub const DEFAULT_TITLE_MARKER: &str = "Amazon Web Services Statement";

/// Number of leading lines searched for the title.
pub const DEFAULT_TITLE_SCAN_LINES: usize = 10;

/// Data rows per table chunk.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Literal phrases that open a tabular section.
pub const DEFAULT_SECTION_HEADERS: [&str; 5] = [
    "Activity By Account",
    "Summary for Linked Account",
    "Detail for Linked Account",
    "Itemized Charges",
    "Service Charges",
];

/// Lowercase phrases that keep a line out of the key/value list.
pub const DEFAULT_EXCLUDED_PHRASES: [&str; 2] = ["please note", "https://"];

/// Settings that drive a [`StatementParser`](crate::parser::StatementParser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Phrase a line must contain to become the title.
    pub title_marker: String,

    /// How many lines from the top are searched for the title.
    pub title_scan_lines: usize,

    /// Section-header markers, matched case-sensitively anywhere in a line.
    pub section_headers: Vec<String>,

    /// Phrases (compared against the lowercased line) that exclude a line
    /// from key/value capture.
    pub excluded_phrases: Vec<String>,

    /// Rows per table chunk. Zero disables chunking.
    pub rows_per_page: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            title_marker: DEFAULT_TITLE_MARKER.to_string(),
            title_scan_lines: DEFAULT_TITLE_SCAN_LINES,
            section_headers: DEFAULT_SECTION_HEADERS.iter().map(|s| s.to_string()).collect(),
            excluded_phrases: DEFAULT_EXCLUDED_PHRASES.iter().map(|s| s.to_string()).collect(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl ExtractorConfig {
    /// Load settings from JSON. Missing keys keep their defaults.
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load settings from a JSON file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::from_read(&mut reader)
    }

    pub fn with_title_marker(mut self, marker: impl Into<String>) -> Self {
        self.title_marker = marker.into();
        self
    }

    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = rows;
        self
    }

    pub fn with_section_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_headers = headers.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_aws_layout() {
        let config = ExtractorConfig::default();
        assert_eq!(config.title_marker, "Amazon Web Services Statement");
        assert_eq!(config.title_scan_lines, 10);
        assert_eq!(config.rows_per_page, 10);
        assert_eq!(config.section_headers.len(), 5);
        assert!(config.section_headers.contains(&"Itemized Charges".to_string()));
    }

    #[test]
    fn test_from_read_keeps_missing_defaults() {
        let json = r#"{ "rows_per_page": 25 }"#;
        let config = ExtractorConfig::from_read(&mut json.as_bytes()).unwrap();
        assert_eq!(config.rows_per_page, 25);
        assert_eq!(config.title_marker, DEFAULT_TITLE_MARKER);
        assert_eq!(config.excluded_phrases, vec!["please note", "https://"]);
    }

    #[test]
    fn test_from_read_rejects_bad_json() {
        assert!(ExtractorConfig::from_read(&mut "not json".as_bytes()).is_err());
    }

    #[test]
    fn test_builders() {
        let config = ExtractorConfig::default()
            .with_title_marker("Invoice")
            .with_rows_per_page(0)
            .with_section_headers(["Charges"]);
        assert_eq!(config.title_marker, "Invoice");
        assert_eq!(config.rows_per_page, 0);
        assert_eq!(config.section_headers, vec!["Charges".to_string()]);
    }
}
