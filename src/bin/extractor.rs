//! Statement Extractor - CLI tool for extracting structured records from statement text.

use clap::Parser;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use statement_extract::{
    conversion::StatementHeader,
    csv_format::CsvStatement,
    json_format::JsonStatement,
    text_format::TextStatement,
    Error, ExtractedStatement, ExtractorConfig, Format, Result, StatementParser,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "statement_extractor")]
#[command(about = "Extract title, fields and charge tables from statement text", long_about = None)]
struct Cli {
    /// Input file path (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Input format (text, json)
    #[arg(long = "input-format", default_value = "text")]
    input_format: String,

    /// Output format (json, csv)
    #[arg(long = "output-format", default_value = "json")]
    output_format: String,

    /// Output file path (or stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// JSON file with extractor settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows per table chunk (0 disables chunking)
    #[arg(long = "rows-per-page")]
    rows_per_page: Option<usize>,

    /// Phrase identifying the statement title
    #[arg(long = "title-marker")]
    title_marker: Option<String>,

    /// Keep the Statement Number / Statement Date key/value pairs
    #[arg(long = "keep-all-pairs")]
    keep_all_pairs: bool,

    /// Fail unless account number, statement number, date and title were found
    #[arg(long = "require-complete")]
    require_complete: bool,
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statement_extract=info,statement_extractor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Parse formats
    let input_format = cli.input_format.parse::<Format>()?;
    let output_format = cli.output_format.parse::<Format>()?;
    if !input_format.can_read() {
        return Err(Error::UnsupportedFormat {
            format: input_format.extension(),
            direction: "input",
        });
    }
    if !output_format.can_write() {
        return Err(Error::UnsupportedFormat {
            format: output_format.extension(),
            direction: "output",
        });
    }

    let parser = StatementParser::new(load_config(&cli)?);

    // Process based on input file or stdin
    let mut statement = if let Some(ref input_path) = cli.input {
        let mut file = File::open(input_path)?;
        read_input(&mut file, input_format, &parser)?
    } else {
        let mut stdin = io::stdin();
        read_input(&mut stdin, input_format, &parser)?
    };

    if !cli.keep_all_pairs {
        statement.strip_named_pairs();
    }
    if cli.require_complete {
        statement.ensure_complete()?;
    }

    let header = StatementHeader::from(&statement);
    info!(
        title = %header.title,
        account_number = %header.account_number,
        statement_number = %header.statement_number,
        statement_date = ?statement.statement_date_parsed(),
        tables = statement.tables.len(),
        rows = statement.row_count(),
        total = %statement.total_amount(),
        "statement extracted"
    );

    // Output based on output file or stdout
    if let Some(ref output_path) = cli.output {
        let mut file = File::create(output_path)?;
        write_output(&mut file, statement, output_format)?;
    } else {
        let mut stdout = io::stdout();
        write_output(&mut stdout, statement, output_format)?;
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ExtractorConfig> {
    let mut config = match cli.config {
        Some(ref path) => ExtractorConfig::from_path(path)?,
        None => ExtractorConfig::default(),
    };
    if let Some(rows) = cli.rows_per_page {
        config = config.with_rows_per_page(rows);
    }
    if let Some(ref marker) = cli.title_marker {
        config = config.with_title_marker(marker.clone());
    }
    Ok(config)
}

fn read_input<R: Read>(reader: &mut R, format: Format, parser: &StatementParser) -> Result<ExtractedStatement> {
    match format {
        Format::Text => {
            let text = TextStatement::from_read(reader, parser)?;
            Ok(text.statement)
        }
        Format::Json => {
            let json = JsonStatement::from_read(reader)?;
            Ok(json.statement)
        }
        Format::Csv => Err(Error::UnsupportedFormat {
            format: format.extension(),
            direction: "input",
        }),
    }
}

fn write_output<W: Write>(writer: &mut W, statement: ExtractedStatement, format: Format) -> Result<()> {
    match format {
        Format::Json => JsonStatement { statement }.write_to(writer),
        Format::Csv => CsvStatement { statement }.write_to(writer),
        Format::Text => Err(Error::UnsupportedFormat {
            format: format.extension(),
            direction: "output",
        }),
    }
}
