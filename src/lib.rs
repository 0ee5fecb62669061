//! Statement Extract Library
//!
//! A library for turning the plain text of a billing statement (as produced
//! by a PDF-to-text step) into a structured record.
//!
//! # Extracted Fields
//!
//! - **Title**: the statement-type line near the top of the document
//! - **Account number, statement number, statement date**
//! - **Key/value pairs**: every `label: value` line, in document order
//! - **Tables**: `[description, amount]` rows from the charge sections,
//!   chunked into pages of at most ten rows
//!
//! Parsing never fails. Anything the parser does not recognize ends up as an
//! empty field or is left out of the tables.
//!
//! # Examples
//!
//! ## Parsing statement text
//!
//! ```
//! let text = "\
//! Amazon Web Services Statement
//! Statement Number: 123
//! Itemized Charges
//! AWS Data Transfer    12.50
//! ";
//! let statement = statement_extract::parse(text);
//! assert_eq!(statement.statement_number, "123");
//! assert_eq!(statement.tables[0][0].amount(), "$12.50");
//! ```
//!
//! ## Writing the detail rows as CSV
//!
//! ```no_run
//! use std::fs::File;
//! use statement_extract::csv_format::CsvStatement;
//! use statement_extract::parser::StatementParser;
//! use statement_extract::text_format::TextStatement;
//!
//! let mut input = File::open("statement.txt")?;
//! let text = TextStatement::from_read(&mut input, &StatementParser::default())?;
//!
//! let mut output = File::create("details.csv")?;
//! CsvStatement { statement: text.statement }.write_to(&mut output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod config;
pub mod types;
pub mod amount;
pub mod classify;
pub mod table;
pub mod parser;
pub mod conversion;
pub mod text_format;
pub mod json_format;
pub mod csv_format;

use std::str::FromStr;

// Re-export commonly used types
pub use config::ExtractorConfig;
pub use error::{Error, Result};
pub use parser::StatementParser;
pub use types::{ExtractedStatement, KeyValuePair, Table, TableRow};

/// Parse statement text with the default configuration.
pub fn parse(text: &str) -> ExtractedStatement {
    StatementParser::default().parse(text)
}

/// Supported statement formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Plain text from a PDF-to-text step (input only)
    Text,
    /// JSON record
    Json,
    /// CSV detail rows (output only)
    Csv,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl Format {
    /// Get file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }

    pub fn can_read(&self) -> bool {
        matches!(self, Format::Text | Format::Json)
    }

    pub fn can_write(&self) -> bool {
        matches!(self, Format::Json | Format::Csv)
    }
}
