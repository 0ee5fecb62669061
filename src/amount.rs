//! Column splitting and amount normalization for table lines.
//!
//! Text extracted from a PDF keeps the visual columns of a table as runs of
//! spaces. A line is split on runs of two or more whitespace characters and
//! the trailing column is read as a dollar amount.

use regex::{NoExpand, Regex};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::types::TableRow;

fn currency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$+([0-9]+(?:\.[0-9]{2})?)").expect("currency regex"))
}

fn column_gap_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("column gap regex"))
}

fn leading_dollars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\$+").expect("leading dollars regex"))
}

/// Split a line into columns on runs of 2+ whitespace characters.
pub fn split_columns(line: &str) -> Vec<&str> {
    column_gap_re().split(line.trim()).collect()
}

/// Find the first `$`-prefixed amount in `text`.
///
/// Returns the amount re-prefixed with a single `$` and the text with the
/// match removed and trimmed.
pub fn extract_embedded_amount(text: &str) -> Option<(String, String)> {
    let caps = currency_re().captures(text)?;
    let whole = caps.get(0)?;
    let amount = format!("${}", &caps[1]);
    let remainder = format!("{}{}", &text[..whole.start()], &text[whole.end()..]);
    Some((amount, remainder.trim().to_string()))
}

/// Collapse any leading `$` run to one `$`, adding it when absent.
pub fn normalize_amount(raw: &str) -> String {
    let collapsed = leading_dollars_re().replace(raw.trim(), NoExpand("$"));
    if collapsed.starts_with('$') {
        collapsed.into_owned()
    } else {
        format!("${}", collapsed)
    }
}

/// Build a `[description, amount]` row from the columns of a table line.
pub fn row_from_columns(columns: &[&str]) -> TableRow {
    match columns {
        [] => TableRow::new("", ""),
        [single] => match extract_embedded_amount(single) {
            Some((amount, description)) => TableRow::new(description, amount),
            None => TableRow::new(*single, ""),
        },
        [leading @ .., last] => {
            let description = leading.join(" ").trim().to_string();
            // The splitter sometimes merges the real amount into the description.
            match extract_embedded_amount(&description) {
                Some((amount, description)) => TableRow::new(description, amount),
                None => TableRow::new(description, normalize_amount(last)),
            }
        }
    }
}

/// Split a table line and build its row.
pub fn row_from_line(line: &str) -> TableRow {
    row_from_columns(&split_columns(line))
}

/// Read a normalized amount such as `$1,234.50` as a decimal.
pub fn parse_amount(amount_str: &str) -> Result<Decimal> {
    let cleaned = amount_str
        .trim()
        .trim_start_matches('$')
        .replace([',', ' '], "");

    Decimal::from_str(&cleaned).map_err(|_| Error::InvalidAmount(amount_str.to_string()))
}
