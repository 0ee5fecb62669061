//! Line classification.
//!
//! Each input line is inspected independently; a single line may set a named
//! field, yield a key/value pair and drive the table state machine at once.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::ExtractorConfig;
use crate::types::KeyValuePair;

fn account_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Account number:").expect("account marker regex"))
}

fn statement_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Statement Number:").expect("statement number regex"))
}

fn statement_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Statement Date:").expect("statement date regex"))
}

fn key_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*?):\s*(.+)").expect("key/value regex"))
}

/// What a line means to the table state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent<'a> {
    /// The line contains a section-header marker.
    Header,
    /// The line is empty after trimming.
    Blank,
    /// Any other line, trimmed.
    Content(&'a str),
}

/// Everything the parser needs to know about one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// The account number sits on the following line.
    pub account_marker: bool,
    pub statement_number: Option<String>,
    pub statement_date: Option<String>,
    pub key_value: Option<KeyValuePair>,
    pub table_event: TableEvent<'a>,
}

/// Classify a raw (untrimmed) line.
pub fn classify<'a>(line: &'a str, config: &ExtractorConfig) -> ClassifiedLine<'a> {
    ClassifiedLine {
        account_marker: is_account_marker(line),
        statement_number: statement_number_value(line),
        statement_date: statement_date_value(line),
        key_value: key_value_pair(line, &config.excluded_phrases),
        table_event: table_event(line, &config.section_headers),
    }
}

/// Search the first `scan_lines` lines for the title marker.
pub fn find_title(lines: &[&str], config: &ExtractorConfig) -> Option<String> {
    lines
        .iter()
        .take(config.title_scan_lines)
        .map(|line| line.trim())
        .find(|line| line.contains(config.title_marker.as_str()))
        .map(str::to_string)
}

pub fn is_account_marker(line: &str) -> bool {
    account_marker_re().is_match(line)
}

/// Value after the first colon of a `Statement Number:` line.
pub fn statement_number_value(line: &str) -> Option<String> {
    value_after_marker(statement_number_re(), line)
}

/// Value after the first colon of a `Statement Date:` line.
pub fn statement_date_value(line: &str) -> Option<String> {
    value_after_marker(statement_date_re(), line)
}

fn value_after_marker(marker: &Regex, line: &str) -> Option<String> {
    if !marker.is_match(line) {
        return None;
    }
    line.split_once(':').map(|(_, rest)| rest.trim().to_string())
}

/// Capture a generic `label: value` line unless it contains an excluded phrase.
pub fn key_value_pair(line: &str, excluded_phrases: &[String]) -> Option<KeyValuePair> {
    let caps = key_value_re().captures(line)?;

    let lowered = line.to_lowercase();
    if excluded_phrases
        .iter()
        .any(|phrase| lowered.contains(&phrase.to_lowercase()))
    {
        return None;
    }

    Some(KeyValuePair::new(caps[1].trim(), caps[2].trim()))
}

pub fn table_event<'a>(line: &'a str, section_headers: &[String]) -> TableEvent<'a> {
    if section_headers
        .iter()
        .any(|header| line.contains(header.as_str()))
    {
        return TableEvent::Header;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        TableEvent::Blank
    } else {
        TableEvent::Content(trimmed)
    }
}
