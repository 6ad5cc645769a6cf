//! `stockfilter` — filter an inventory export down to the rows to restock.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{ensure, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use serde_json::json;

use stockfilter_observability::LogFormat;
use stockfilter_rules::{process, FilterConfig, FilterReport};
use stockfilter_spreadsheet::{read_table, save_output, write_xlsx, ReadOptions};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "stockfilter", version, about)]
struct Args {
    /// Inventory export to filter (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv).
    input: PathBuf,

    /// Directory receiving the `YYYY-MM-DD.xlsx` output.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// TOML rule file replacing the built-in rule lists.
    #[arg(long, env = "STOCKFILTER_RULES")]
    rules: Option<PathBuf>,

    /// Worksheet to read instead of the first one.
    #[arg(long)]
    sheet: Option<String>,

    /// Field delimiter for CSV input.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Date used to name the output file (defaults to today).
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,

    #[arg(long, env = "STOCKFILTER_LOG_FORMAT", default_value = "json")]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();
    stockfilter_observability::init(args.log_format);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "run failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    ensure!(
        args.delimiter.is_ascii(),
        "csv delimiter must be a single ASCII character, got {:?}",
        args.delimiter
    );

    let config = match &args.rules {
        Some(path) => FilterConfig::load(path)
            .with_context(|| format!("loading rules from {}", path.display()))?,
        None => FilterConfig::default(),
    };

    let options = ReadOptions {
        sheet: args.sheet.clone(),
        csv_delimiter: args.delimiter as u8,
    };
    let table = read_table(&args.input, &options)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let outcome = process(table, &config)
        .with_context(|| format!("processing {}", args.input.display()))?;

    let bytes = write_xlsx(&outcome.table).context("serializing the filtered table")?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let path = save_output(&args.output_dir, date, &bytes)?;

    print_report(args.report, &path, &outcome.report)
}

fn print_report(format: ReportFormat, path: &std::path::Path, report: &FilterReport) -> anyhow::Result<()> {
    match format {
        ReportFormat::Text => {
            println!("filtered spreadsheet written to {}", path.display());
            println!("{report}");
        }
        ReportFormat::Json => {
            let doc = json!({
                "output": path.display().to_string(),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}
