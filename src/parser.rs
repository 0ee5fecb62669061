//! Statement text parser.
//!
//! Converts the plain text of a statement into an [`ExtractedStatement`] in
//! a single forward pass. The pass is a fold of [`ParseState::step`] over the
//! lines, with the following line available as lookahead.
//!
//! Malformed or unexpected text never produces an error: unmatched patterns
//! leave fields empty and rows without an amount are dropped.

use tracing::{debug, trace};

use crate::classify::{classify, find_title};
use crate::config::ExtractorConfig;
use crate::table::TableAccumulator;
use crate::types::{ExtractedStatement, KeyValuePair};

/// Accumulated state of one parsing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pub title: String,
    pub account_number: String,
    pub statement_number: String,
    pub statement_date: String,
    pub key_value_pairs: Vec<KeyValuePair>,
    pub tables: TableAccumulator,
}

impl ParseState {
    fn new(title: String, config: &ExtractorConfig) -> Self {
        Self {
            title,
            tables: TableAccumulator::new(config.rows_per_page),
            ..Default::default()
        }
    }

    /// Consume one line. `next` is the following line, if any.
    pub fn step(mut self, line: &str, next: Option<&str>, config: &ExtractorConfig) -> Self {
        let classified = classify(line, config);
        trace!(?classified, "line classified");

        if classified.account_marker {
            if let Some(next) = next {
                self.account_number = next.trim().to_string();
            }
        }
        if let Some(number) = classified.statement_number {
            self.statement_number = number;
        }
        if let Some(date) = classified.statement_date {
            self.statement_date = date;
        }
        if let Some(pair) = classified.key_value {
            self.key_value_pairs.push(pair);
        }

        self.tables = self.tables.apply(classified.table_event);
        self
    }

    /// Flush the open table and build the final record.
    pub fn finish(self) -> ExtractedStatement {
        ExtractedStatement {
            title: self.title,
            tables: self.tables.finish(),
            key_value_pairs: self.key_value_pairs,
            account_number: self.account_number,
            statement_number: self.statement_number,
            statement_date: self.statement_date,
        }
    }
}

/// Parser for statement text. Holds only configuration, so one parser can be
/// shared freely between threads and calls.
#[derive(Debug, Clone, Default)]
pub struct StatementParser {
    config: ExtractorConfig,
}

impl StatementParser {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parse statement text into a structured record.
    ///
    /// # Examples
    ///
    /// ```
    /// use statement_extract::parser::StatementParser;
    ///
    /// let text = "Amazon Web Services Statement\nStatement Number: 42\n";
    /// let statement = StatementParser::default().parse(text);
    /// assert_eq!(statement.title, "Amazon Web Services Statement");
    /// assert_eq!(statement.statement_number, "42");
    /// ```
    pub fn parse(&self, text: &str) -> ExtractedStatement {
        let lines = split_lines(text);
        let title = find_title(&lines, &self.config).unwrap_or_default();

        let state = lines
            .iter()
            .enumerate()
            .fold(ParseState::new(title, &self.config), |state, (index, line)| {
                state.step(line, lines.get(index + 1).copied(), &self.config)
            });

        let statement = state.finish();
        debug!(
            lines = lines.len(),
            tables = statement.tables.len(),
            rows = statement.row_count(),
            pairs = statement.key_value_pairs.len(),
            "statement parsed"
        );
        statement
    }
}

/// Split on `\n`, dropping a leading byte order mark and a trailing `\r`
/// from each line.
fn split_lines(text: &str) -> Vec<&str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TableRow;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
Amazon Web Services Statement
Account number:
1234-5678-9012
Statement Number: 987654321
Statement Date: March 2 , 2024
Invoice Date: March 2 , 2024
Please note: this is not an invoice
Manage billing at https://console.aws.amazon.com
Total: $45.10

Summary for Linked Account
Amazon Elastic Compute Cloud    $30.00
Amazon Simple Storage Service   $$5.10
AWS Support $10.00
Charges by service

Thank you for using AWS
";

    fn parse(text: &str) -> ExtractedStatement {
        StatementParser::default().parse(text)
    }

    #[test]
    fn test_parse_sample_statement() {
        let statement = parse(SAMPLE);

        assert_eq!(statement.title, "Amazon Web Services Statement");
        assert_eq!(statement.account_number, "1234-5678-9012");
        assert_eq!(statement.statement_number, "987654321");
        assert_eq!(statement.statement_date, "March 2 , 2024");
        assert_eq!(
            statement.key_value_pairs,
            vec![
                KeyValuePair::new("Statement Number", "987654321"),
                KeyValuePair::new("Statement Date", "March 2 , 2024"),
                KeyValuePair::new("Invoice Date", "March 2 , 2024"),
                KeyValuePair::new("Total", "$45.10"),
            ]
        );
        assert_eq!(
            statement.tables,
            vec![vec![
                TableRow::new("Amazon Elastic Compute Cloud", "$30.00"),
                TableRow::new("Amazon Simple Storage Service", "$5.10"),
                TableRow::new("AWS Support", "$10.00"),
            ]]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), ExtractedStatement::default());
        assert_eq!(parse("   \n\t\n"), ExtractedStatement::default());
    }

    #[test]
    fn test_title_after_line_ten_ignored() {
        let mut text = "line\n".repeat(10);
        text.push_str("Amazon Web Services Statement\n");
        assert_eq!(parse(&text).title, "");
    }

    #[test]
    fn test_account_marker_on_last_line() {
        let statement = parse("Account number: 1\nabc\nAccount number:");
        assert_eq!(statement.account_number, "abc");

        let statement = parse("Account number:");
        assert_eq!(statement.account_number, "");
    }

    #[test]
    fn test_account_pair_kept_alongside_field() {
        let statement = parse("Account number: 55\n66");
        assert_eq!(statement.account_number, "66");
        assert_eq!(
            statement.key_value_pairs,
            vec![KeyValuePair::new("Account number", "55")]
        );
    }

    #[test]
    fn test_duplicate_keys_appended() {
        let statement = parse("Region: us-east-1\nRegion: eu-west-1");
        assert_eq!(
            statement.key_value_pairs,
            vec![
                KeyValuePair::new("Region", "us-east-1"),
                KeyValuePair::new("Region", "eu-west-1"),
            ]
        );
    }

    #[test]
    fn test_crlf_input() {
        let statement = parse("Statement Number: 7\r\nItemized Charges\r\nEC2  $1.00\r\n\r\n");
        assert_eq!(statement.statement_number, "7");
        assert_eq!(statement.tables, vec![vec![TableRow::new("EC2", "$1.00")]]);
    }

    #[test]
    fn test_leading_byte_order_mark_dropped() {
        let statement = parse("\u{feff}Amazon Web Services Statement\nStatement Number: 5\n");
        assert_eq!(statement.title, "Amazon Web Services Statement");
        assert_eq!(statement.statement_number, "5");

        let statement = parse("\u{feff}Region: us-east-1");
        assert_eq!(
            statement.key_value_pairs,
            vec![KeyValuePair::new("Region", "us-east-1")]
        );
    }

    #[test]
    fn test_twenty_three_rows_chunked() {
        let mut text = String::from("Itemized Charges\n");
        for i in 0..23 {
            text.push_str(&format!("Usage item {}    $1.{:02}\n", i, i));
        }
        let statement = parse(&text);
        let sizes: Vec<usize> = statement.tables.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![10, 10, 3]);
        assert_eq!(statement.tables[1][0], TableRow::new("Usage item 10", "$1.10"));
    }

    #[test]
    fn test_every_row_has_amount() {
        let statement = parse(SAMPLE);
        assert!(statement.tables.iter().flatten().all(TableRow::has_amount));
    }

    #[test]
    fn test_table_emptied_by_filter_is_kept() {
        let statement = parse("Service Charges\nnothing billable\n\n");
        assert_eq!(statement.tables, vec![Vec::<TableRow>::new()]);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let parser = StatementParser::default();
        assert_eq!(parser.parse(SAMPLE), parser.parse(SAMPLE));
    }

    #[test]
    fn test_custom_config() {
        let config = ExtractorConfig::default()
            .with_title_marker("Invoice")
            .with_section_headers(["Charges"])
            .with_rows_per_page(1);
        let statement = StatementParser::new(config).parse("Invoice 2024\nCharges\na  $1.00\nb  $2.00\n");
        assert_eq!(statement.title, "Invoice 2024");
        assert_eq!(statement.tables.len(), 2);
    }
}
