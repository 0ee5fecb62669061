//! Statement Compare - CLI tool for comparing two extracted statements.

use clap::Parser;
use std::fs::File;
use statement_extract::{
    json_format::JsonStatement,
    text_format::TextStatement,
    Error, ExtractedStatement, Format, Result, StatementParser,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "statement_compare")]
#[command(about = "Compare two statements extracted from text or JSON", long_about = None)]
struct Cli {
    /// First file path
    #[arg(long = "file1")]
    file1: String,

    /// First file format (text, json)
    #[arg(long = "format1", default_value = "text")]
    format1: String,

    /// Second file path
    #[arg(long = "file2")]
    file2: String,

    /// Second file format (text, json)
    #[arg(long = "format2", default_value = "text")]
    format2: String,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statement_extract=info,statement_compare=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Parse formats
    let format1 = cli.format1.parse::<Format>()?;
    let format2 = cli.format2.parse::<Format>()?;

    let parser = StatementParser::default();

    // Read and parse first file
    let mut file1 = File::open(&cli.file1)?;
    let statement1 = load_statement(&mut file1, format1, &parser)?;

    // Read and parse second file
    let mut file2 = File::open(&cli.file2)?;
    let statement2 = load_statement(&mut file2, format2, &parser)?;

    debug!(
        rows1 = statement1.row_count(),
        rows2 = statement2.row_count(),
        "statements loaded"
    );

    println!("{}", compare_statements(&statement1, &statement2, &cli.file1, &cli.file2));

    Ok(())
}

fn load_statement<R: std::io::Read>(reader: &mut R, format: Format, parser: &StatementParser) -> Result<ExtractedStatement> {
    let mut statement = match format {
        Format::Text => TextStatement::from_read(reader, parser)?.statement,
        Format::Json => JsonStatement::from_read(reader)?.statement,
        Format::Csv => {
            return Err(Error::UnsupportedFormat {
                format: format.extension(),
                direction: "input",
            })
        }
    };
    statement.strip_named_pairs();
    Ok(statement)
}

fn compare_statements(stmt1: &ExtractedStatement, stmt2: &ExtractedStatement, name1: &str, name2: &str) -> String {
    let mut differences = Vec::new();

    let same_statement = match (stmt1.duplicate_key(), stmt2.duplicate_key()) {
        (Some(key1), Some(key2)) => key1 == key2,
        _ => false,
    };

    // Compare named fields
    let fields = [
        ("Title", &stmt1.title, &stmt2.title),
        ("Account number", &stmt1.account_number, &stmt2.account_number),
        ("Statement number", &stmt1.statement_number, &stmt2.statement_number),
        ("Statement date", &stmt1.statement_date, &stmt2.statement_date),
    ];
    for (label, value1, value2) in fields {
        if value1 != value2 {
            differences.push(format!("{} differs: '{}' vs '{}'", label, value1, value2));
        }
    }

    // Compare key/value pairs in line order
    if stmt1.key_value_pairs.len() != stmt2.key_value_pairs.len() {
        differences.push(format!(
            "Number of key/value pairs differs: {} vs {}",
            stmt1.key_value_pairs.len(),
            stmt2.key_value_pairs.len()
        ));
    }
    for (i, (pair1, pair2)) in stmt1.key_value_pairs.iter().zip(&stmt2.key_value_pairs).enumerate() {
        if pair1 != pair2 {
            differences.push(format!(
                "Key/value pair {} differs: '{}: {}' vs '{}: {}'",
                i + 1,
                pair1.key,
                pair1.value,
                pair2.key,
                pair2.value
            ));
        }
    }

    // Compare number of tables
    if stmt1.tables.len() != stmt2.tables.len() {
        differences.push(format!(
            "Number of tables differs: {} vs {}",
            stmt1.tables.len(),
            stmt2.tables.len()
        ));
    }

    // Compare rows table by table
    for (t, (table1, table2)) in stmt1.tables.iter().zip(&stmt2.tables).enumerate() {
        if table1.len() != table2.len() {
            differences.push(format!(
                "Table {} row count differs: {} vs {}",
                t + 1,
                table1.len(),
                table2.len()
            ));
        }

        for (r, (row1, row2)) in table1.iter().zip(table2).enumerate() {
            if row1.amount() != row2.amount() {
                differences.push(format!(
                    "Table {} row {} amount differs: {} vs {}",
                    t + 1,
                    r + 1,
                    row1.amount(),
                    row2.amount()
                ));
            }

            let desc1 = normalize_string(row1.description());
            let desc2 = normalize_string(row2.description());
            if desc1 != desc2 {
                differences.push(format!(
                    "Table {} row {} description differs:\n  File 1: {}\n  File 2: {}",
                    t + 1,
                    r + 1,
                    row1.description(),
                    row2.description()
                ));
            }
        }
    }

    let total1 = stmt1.total_amount();
    let total2 = stmt2.total_amount();
    if total1 != total2 {
        differences.push(format!("Total amount differs: {} vs {}", total1, total2));
    }

    let mut result = String::new();
    if same_statement {
        result.push_str("Both files carry the same account and statement number.\n");
    }

    if differences.is_empty() {
        result.push_str(&format!(
            "The statements extracted from '{}' and '{}' are identical.",
            name1, name2
        ));
    } else {
        result.push_str("Differences found:\n");
        for diff in differences {
            result.push_str("  - ");
            result.push_str(&diff);
            result.push('\n');
        }
    }
    result
}

fn normalize_string(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_statements() {
        let statement = statement_extract::parse("Region: a\nService Charges\nSupport  $1.00\n");
        let result = compare_statements(&statement, &statement.clone(), "a.txt", "b.txt");
        assert!(result.contains("are identical"));
    }

    #[test]
    fn test_single_pair_value_differs() {
        let stmt1 = statement_extract::parse("Region: a");
        let stmt2 = statement_extract::parse("Region: b");
        let result = compare_statements(&stmt1, &stmt2, "a.txt", "b.txt");
        assert!(result.starts_with("Differences found:"));
        assert!(result.contains("Key/value pair 1 differs: 'Region: a' vs 'Region: b'"));
        assert!(!result.contains("Number of key/value pairs"));
    }

    #[test]
    fn test_pair_count_differs() {
        let stmt1 = statement_extract::parse("Region: a\nZone: 1");
        let stmt2 = statement_extract::parse("Region: a");
        let result = compare_statements(&stmt1, &stmt2, "a.txt", "b.txt");
        assert!(result.contains("Number of key/value pairs differs: 2 vs 1"));
        assert!(!result.contains("Key/value pair 1 differs"));
    }
}
