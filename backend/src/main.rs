//! mention-stats CLI - Summarize curriculum mention tables
//!
//! # Main Command
//!
//! ```bash
//! mention-stats summarize curriculum.csv   # writes curriculum_SummaryStats.json
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! mention-stats parse curriculum.csv       # Parsed rows as JSON
//! mention-stats expand curriculum.csv      # One row per scientist, as JSON
//! mention-stats validate report.json       # Check a report against the schema
//! mention-stats schema                     # Print the report schema
//! ```

use clap::{Parser, Subcommand};
use mention_stats::logs::{log_error, log_info, log_info_indent, log_success};
use mention_stats::{
    expand, format_delimiter, logs, mention_table, parse_bytes, summarize_csv, to_pretty_json,
    validate_summary_report, write_report, SummaryOptions, SUMMARY_REPORT_SCHEMA,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mention-stats")]
#[command(about = "Summary statistics for curriculum mentions of scientists", long_about = None)]
struct Cli {
    /// Don't print progress logs
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the summary report for a CSV file
    Summarize {
        /// Input CSV file
        input: PathBuf,

        /// Report file (default: <input stem>_SummaryStats.json next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the default report file name
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the report to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Input encoding (auto-detect if not specified)
        #[arg(short, long)]
        encoding: Option<String>,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Skip schema validation of the report
        #[arg(long)]
        no_validate: bool,
    },

    /// Parse a CSV file and output its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expand multi-valued cells and output one row per scientist as JSON
    Expand {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a report JSON file against the report schema
    Validate {
        /// Report JSON file
        input: PathBuf,
    },

    /// Show the report JSON schema
    Schema,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logs::set_quiet(cli.quiet);

    let env_options = SummaryOptions::from_env();

    let result = match cli.command {
        Commands::Summarize {
            input,
            output,
            output_dir,
            stdout,
            encoding,
            delimiter,
            no_validate,
        } => {
            let options = SummaryOptions {
                encoding: encoding.or(env_options.encoding),
                delimiter: delimiter.or(env_options.delimiter),
                output_dir: output_dir.or(env_options.output_dir),
                skip_validation: no_validate,
            };
            cmd_summarize(&input, options, output.as_deref(), stdout)
        }

        Commands::Parse { input, output } => {
            cmd_parse(&input, &env_options, output.as_deref())
        }

        Commands::Expand { input, output } => {
            cmd_expand(&input, &env_options, output.as_deref())
        }

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Schema => cmd_schema(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_summarize(
    input: &Path,
    options: SummaryOptions,
    output: Option<&Path>,
    stdout: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = summarize_csv(input, &options)?;

    if stdout {
        println!("{}", to_pretty_json(&result.report)?);
    } else {
        let path = output.unwrap_or(&result.output_path);
        write_report(&result.report, path)?;
    }

    let overall = &result.report.overall;
    log_info("📊 Summary:");
    log_info_indent(
        format!(
            "Concept mentions: {} male, {} female",
            overall.concept.male, overall.concept.female
        ),
        1,
    );
    log_info_indent(
        format!(
            "Scientist mentions: {} male, {} female",
            overall.scientist.male, overall.scientist.female
        ),
        1,
    );
    log_info_indent(
        format!(
            "Unique scientists: {} male, {} female",
            overall.unique.male, overall.unique.female
        ),
        1,
    );

    log_success("✨ Done!");
    Ok(())
}

fn cmd_parse(
    input: &Path,
    options: &SummaryOptions,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    log_info(format!("📄 Parsing CSV: {}", input.display()));

    let bytes = fs::read(input)?;
    let parsed = parse_bytes(&bytes, options.encoding.as_deref(), options.delimiter)?;

    log_info_indent(format!("Encoding: {}", parsed.encoding), 1);
    log_info_indent(format!("Delimiter: '{}'", format_delimiter(parsed.delimiter)), 1);
    log_info_indent(format!("Columns: {}", parsed.headers.join(", ")), 1);
    log_success(format!("Parsed {} records", parsed.rows.len()));

    let json = serde_json::to_string_pretty(&parsed.to_json_records())?;
    write_output(&json, output)
}

fn cmd_expand(
    input: &Path,
    options: &SummaryOptions,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    log_info(format!("📄 Expanding: {}", input.display()));

    let bytes = fs::read(input)?;
    let parsed = parse_bytes(&bytes, options.encoding.as_deref(), options.delimiter)?;
    let table = mention_table(&parsed)?;
    let expanded = expand(&table)?;

    log_success(format!(
        "{} rows → {} mentions",
        table.records.len(),
        expanded.len()
    ));

    let json = serde_json::to_string_pretty(&expanded)?;
    write_output(&json, output)
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log_info(format!("✔️  Validating: {}", input.display()));

    let content = fs::read_to_string(input)?;
    let report: Value = serde_json::from_str(&content)?;

    match validate_summary_report(&report) {
        Ok(()) => {
            log_success("Report is valid");
            Ok(())
        }
        Err(errors) => {
            for err in errors.iter().take(10) {
                log_error(err.as_str());
            }
            Err(format!("{} schema error(s)", errors.len()).into())
        }
    }
}

fn cmd_schema() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", SUMMARY_REPORT_SCHEMA);
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            log_success(format!("💾 Output written to: {}", p.display()));
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
