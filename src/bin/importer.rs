//! SPEI Import - CLI tool for loading a pipe-delimited transfer file.

use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use spei_batch::{
    csv_format::CsvExport,
    pipe_format::PipeBatch,
    ExportFormat, Result, TransactionRecord,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spei_import")]
#[command(about = "Validate and normalize a pipe-delimited transfer file", long_about = None)]
struct Cli {
    /// Input file path (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Output format (pipe, csv, json)
    #[arg(long = "output-format", default_value = "pipe")]
    output_format: String,

    /// Output file path (or stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let output_format = cli.output_format.parse::<ExportFormat>()?;

    let batch = if let Some(ref input_path) = cli.input {
        let mut file = File::open(input_path)?;
        PipeBatch::from_read(&mut file)?
    } else {
        let mut stdin = io::stdin();
        PipeBatch::from_read(&mut stdin)?
    };
    info!(records = batch.records.len(), "import accepted");

    if let Some(ref output_path) = cli.output {
        let mut file = File::create(output_path)?;
        write_output(&mut file, batch.records, output_format)?;
    } else {
        let mut stdout = io::stdout();
        write_output(&mut stdout, batch.records, output_format)?;
    }

    Ok(())
}

fn write_output<W: Write>(
    writer: &mut W,
    records: Vec<TransactionRecord>,
    format: ExportFormat,
) -> Result<()> {
    match format {
        ExportFormat::Pipe => PipeBatch { records }.write_to(writer)?,
        ExportFormat::Csv => CsvExport { records }.write_to(writer)?,
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &records)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

