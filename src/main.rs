//! Shelfsight CLI - chart-ready datasets for the sales dashboard
//!
//! # Main Commands
//!
//! ```bash
//! shelfsight report transactions.csv --mode "Sales Trend"
//! shelfsight report                       # runs on the embedded sample data
//! shelfsight insights                     # static insights text
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! shelfsight parse transactions.csv       # just parse CSV to JSON rows
//! shelfsight validate records.json        # validate records against the schema
//! shelfsight modes                        # list chart mode tokens
//! shelfsight sample                       # dump the embedded sample dataset
//! ```

use clap::{Parser, Subcommand};
use serde_json::Value;
use shelfsight::{
    read_table, report_from_bytes, report_from_csv, sample_csv, validate_record, ChartMode,
    DatasetError, ReportOptions, ALL_MODES,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shelfsight")]
#[command(about = "Aggregate retail transaction data into chart-ready dashboard datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and output raw rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the chart-ready report for one dashboard mode
    Report {
        /// Input CSV file (default: the embedded sample dataset)
        input: Option<PathBuf>,

        /// Chart mode token ("Stockout Risk", "Sales Trend", "Cluster Analysis")
        #[arg(short, long, default_value = "Stockout Risk")]
        mode: String,

        /// Skip schema validation
        #[arg(long)]
        no_validate: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate JSON records against the transaction record schema
    Validate {
        /// Input JSON file (array of records)
        input: PathBuf,
    },

    /// List the chart mode tokens and titles
    Modes,

    /// Output the embedded sample dataset as CSV
    Sample {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the static insights text
    Insights,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Report {
            input,
            mode,
            no_validate,
            output,
        } => cmd_report(input.as_deref(), &mode, no_validate, output.as_deref()),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Modes => cmd_modes(),

        Commands::Sample { output } => write_output(sample_csv(), output.as_deref()),

        Commands::Insights => cmd_insights(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let table = read_table(input)?;

    eprintln!("   Encoding: {}", table.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(table.delimiter));
    eprintln!("   Columns: {}", table.headers.join(", "));
    eprintln!("✅ Parsed {} rows", table.row_count());

    let json = serde_json::to_string_pretty(&table.rows)?;
    write_output(&json, output)
}

fn cmd_report(
    input: Option<&Path>,
    mode: &str,
    no_validate: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode = ChartMode::from_token(mode)
        .ok_or_else(|| DatasetError::UnknownMode(mode.to_string()))?;

    let options = ReportOptions {
        mode,
        skip_validation: no_validate,
    };

    let report = match input {
        Some(path) => {
            eprintln!("📄 Processing: {}", path.display());
            report_from_csv(path, &options)?
        }
        None => {
            eprintln!("📄 Processing embedded sample dataset");
            report_from_bytes(sample_csv().as_bytes(), &options)?
        }
    };

    if let Some(ref info) = report.dataset {
        eprintln!("   Encoding: {}", info.encoding);
        eprintln!("   Delimiter: '{}'", format_delimiter(info.delimiter));
        eprintln!("   Rows: {} ({} records)", info.row_count, info.record_count);
        if report.skipped > 0 {
            eprintln!("   ⚠️  Skipped rows: {}", report.skipped);
        }
    }

    if !no_validate {
        if report.invalid_count > 0 {
            eprintln!("   ✅ Valid: {}", report.valid_count);
            eprintln!("   ❌ Invalid: {}", report.invalid_count);
            for (i, errors) in report.validation_errors.iter().take(5) {
                eprintln!("\n   Record {}:", i);
                for err in errors.iter().take(3) {
                    eprintln!("     - {}", err);
                }
            }
        } else {
            eprintln!("   ✅ All {} records valid", report.valid_count);
        }
    }

    eprintln!("\n📊 {}: {} derived rows", report.title, report.data.len());

    let json = serde_json::to_string_pretty(&report)?;
    write_output(&json, output)
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let records: Vec<Value> = serde_json::from_str(&content)?;

    let mut valid = 0;
    let mut invalid = 0;

    for (i, record) in records.iter().enumerate() {
        match validate_record(record) {
            Ok(()) => valid += 1,
            Err(errors) => {
                invalid += 1;
                if invalid <= 5 {
                    eprintln!("\n❌ Record {} invalid:", i);
                    for err in errors.iter().take(3) {
                        eprintln!("   - {}", err);
                    }
                }
            }
        }
    }

    eprintln!("\n📊 Results: {} valid, {} invalid", valid, invalid);

    if invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_modes() -> Result<(), Box<dyn std::error::Error>> {
    for mode in ALL_MODES {
        println!("{:18} {}", mode.token(), mode.title());
    }
    Ok(())
}

fn cmd_insights() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", shelfsight::insights_markdown());
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
