//! The extracted statement record and its parts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::parse_amount;
use crate::error::{Error, Result};

/// Key of the pair that duplicates `statement_number`.
pub const STATEMENT_NUMBER_KEY: &str = "Statement Number";

/// Key of the pair that duplicates `statement_date`.
pub const STATEMENT_DATE_KEY: &str = "Statement Date";

/// A generic `label: value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One table row, serialized as a two-element array `[description, amount]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow(pub String, pub String);

impl TableRow {
    pub fn new(description: impl Into<String>, amount: impl Into<String>) -> Self {
        TableRow(description.into(), amount.into())
    }

    pub fn description(&self) -> &str {
        &self.0
    }

    /// Normalized `$`-prefixed amount, or empty when none was found.
    pub fn amount(&self) -> &str {
        &self.1
    }

    pub fn has_amount(&self) -> bool {
        !self.1.trim().is_empty()
    }

    /// Amount as a decimal, if it reads as a number.
    pub fn amount_value(&self) -> Option<Decimal> {
        parse_amount(&self.1).ok()
    }
}

/// A table chunk: at most one page of rows.
pub type Table = Vec<TableRow>;

/// Structured record produced from one statement text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedStatement {
    /// First line near the top containing the title marker, or empty.
    pub title: String,

    /// Table chunks in document order.
    pub tables: Vec<Table>,

    /// Generic `label: value` captures in line order, duplicates kept.
    pub key_value_pairs: Vec<KeyValuePair>,

    /// Line following the `Account number:` marker.
    pub account_number: String,

    pub statement_number: String,

    /// Kept as written in the statement; see [`Self::statement_date_parsed`].
    pub statement_date: String,
}

impl ExtractedStatement {
    /// Drop the `Statement Number` and `Statement Date` pairs, which repeat
    /// the dedicated fields. `Account number` pairs stay.
    pub fn strip_named_pairs(&mut self) {
        self.key_value_pairs
            .retain(|pair| pair.key != STATEMENT_NUMBER_KEY && pair.key != STATEMENT_DATE_KEY);
    }

    /// Check that every field needed to store the statement is present.
    pub fn ensure_complete(&self) -> Result<()> {
        let required = [
            ("accountNumber", &self.account_number),
            ("statementNumber", &self.statement_number),
            ("statementDate", &self.statement_date),
            ("title", &self.title),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::MissingField(name.to_string()));
            }
        }
        Ok(())
    }

    /// Identity of a stored statement: `(account number, statement number)`.
    pub fn duplicate_key(&self) -> Option<(&str, &str)> {
        if self.account_number.is_empty() || self.statement_number.is_empty() {
            return None;
        }
        Some((&self.account_number, &self.statement_number))
    }

    /// Statement date as a calendar date, when it is in a recognized layout.
    pub fn statement_date_parsed(&self) -> Option<NaiveDate> {
        parse_statement_date(&self.statement_date)
    }

    /// Number of rows across every table.
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(Vec::len).sum()
    }

    /// Sum of every row amount that reads as a number.
    pub fn total_amount(&self) -> Decimal {
        self.tables
            .iter()
            .flatten()
            .filter_map(TableRow::amount_value)
            .sum()
    }
}

fn parse_statement_date(date_str: &str) -> Option<NaiveDate> {
    // "March 2 , 2024" -> "March 2, 2024"
    let normalized = date_str
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" ,", ",");

    let formats = [
        "%B %d, %Y", // March 2, 2024
        "%b %d, %Y", // Mar 2, 2024
        "%Y-%m-%d",  // 2024-03-02
        "%m/%d/%Y",  // 03/02/2024
        "%d.%m.%Y",  // 02.03.2024
    ];

    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&normalized, format).ok())
}
