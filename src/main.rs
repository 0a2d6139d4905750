//! CLI entry point for the trip-data statistics tool.
//!
//! Provides subcommands for measuring a single monthly release (or a whole
//! year of them) and for answering the homework sheet's data questions.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use tripdata_stats::{
    aggregate::{self, PartitionReport, RangeSummary},
    analyzer,
    archive::CleanupPolicy,
    dataset::{DEFAULT_BASE_URL, DatasetRef},
    fetch::BasicClient,
    output::{self, group_digits},
    quiz,
};

#[derive(Parser)]
#[command(name = "tripdata_stats")]
#[command(about = "Download and measure monthly trip-data releases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download one month (or a whole year) and report size and row counts
    Analyze {
        /// Trip record category, e.g. "yellow" or "green"
        category: String,

        /// Four-digit release year
        year: u16,

        /// Month 1-12, or "all" for every month of the year
        month: String,

        /// Keep the decompressed CSV instead of deleting it
        #[arg(long, default_value_t = false)]
        keep_csv: bool,

        /// Directory for transient downloads
        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,

        /// CSV file to append per-partition results to
        #[arg(short, long, default_value = "report.csv")]
        output: String,

        /// Print the range summary as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Answer the data-backed questions from the homework sheet
    Homework {
        /// Directory for transient downloads
        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/tripdata_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("tripdata_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let base_url =
        std::env::var("TRIPDATA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = BasicClient::new();

    match cli.command {
        Commands::Analyze {
            category,
            year,
            month,
            keep_csv,
            workdir,
            output,
            json,
        } => {
            let cleanup = if keep_csv {
                CleanupPolicy::KeepCsv
            } else {
                CleanupPolicy::RemoveAll
            };

            if month.eq_ignore_ascii_case("all") {
                let refs = DatasetRef::year_range(&category, year)?;
                let summary =
                    aggregate::analyze_range(&client, &refs, &base_url, &workdir, cleanup).await;
                append_reports(&output, &summary)?;

                if json {
                    output::print_json(&summary)?;
                } else {
                    output::print_range_summary(&category, year, &summary);
                }
            } else {
                let Ok(month) = month.parse::<u8>() else {
                    bail!("month must be a number in 1..=12 or the literal \"all\"");
                };
                let dataset = DatasetRef::new(&category, year, month)?;
                let result = analyzer::analyze(&client, &dataset, &base_url, &workdir, cleanup)
                    .await?;

                output::append_record(&output, &PartitionReport::measured(&dataset, &result))?;
                output::print_analysis(&dataset, &result);
            }
        }
        Commands::Homework { workdir } => {
            run_homework(&client, &base_url, &workdir).await?;
        }
    }

    Ok(())
}

fn append_reports(path: &str, summary: &RangeSummary) -> Result<()> {
    for report in &summary.reports {
        output::append_record(path, report)?;
    }
    Ok(())
}

fn print_heading(title: &str) {
    let bar = "=".repeat(70);
    println!("\n{bar}");
    println!("{title}");
    println!("{bar}");
}

fn print_answer(value: f64, choices: &[quiz::Choice]) {
    match quiz::match_choice(value, choices) {
        Some(label) => println!("\nANSWER: {label}"),
        None => println!("\nANSWER: no option matches {value:.1}, closest match needed"),
    }
}

/// Runs the four data-backed homework questions end to end.
///
/// Each question downloads what it needs, prints the measurement, and maps
/// it onto the sheet's answer choices. A failed download skips that one
/// question rather than aborting the rest.
async fn run_homework(client: &BasicClient, base_url: &str, workdir: &Path) -> Result<()> {
    print_heading("QUESTION 1: Yellow Taxi December 2020 - Uncompressed File Size");
    let dataset = DatasetRef::new("yellow", 2020, 12)?;
    match analyzer::analyze(client, &dataset, base_url, workdir, CleanupPolicy::RemoveAll).await {
        Ok(result) => {
            println!("Uncompressed size: {:.1} MiB", result.size_mib());
            println!("Row count: {}", group_digits(result.row_count));
            print_answer(result.size_mib(), quiz::YELLOW_DEC_2020_SIZE_MIB);
        }
        Err(e) => error!(error = %e, "Question 1 download failed"),
    }

    print_heading("QUESTION 3: Yellow Taxi 2020 - Total Row Count (All Months)");
    let refs = DatasetRef::year_range("yellow", 2020)?;
    let summary =
        aggregate::analyze_range(client, &refs, base_url, workdir, CleanupPolicy::RemoveAll).await;
    report_year_total(&summary, quiz::YELLOW_2020_TOTAL_ROWS);

    print_heading("QUESTION 4: Green Taxi 2020 - Total Row Count (All Months)");
    let refs = DatasetRef::year_range("green", 2020)?;
    let summary =
        aggregate::analyze_range(client, &refs, base_url, workdir, CleanupPolicy::RemoveAll).await;
    report_year_total(&summary, quiz::GREEN_2020_TOTAL_ROWS);

    print_heading("QUESTION 5: Yellow Taxi March 2021 - Row Count");
    let dataset = DatasetRef::new("yellow", 2021, 3)?;
    match analyzer::analyze(client, &dataset, base_url, workdir, CleanupPolicy::RemoveAll).await {
        Ok(result) => {
            println!("Row count: {}", group_digits(result.row_count));
            print_answer(result.row_count as f64, quiz::YELLOW_MAR_2021_ROWS);
        }
        Err(e) => error!(error = %e, "Question 5 download failed"),
    }

    Ok(())
}

fn report_year_total(summary: &RangeSummary, choices: &[quiz::Choice]) {
    for report in &summary.reports {
        if let Some(rows) = report.row_count {
            println!("  {}: {} rows", report.dataset, group_digits(rows));
        }
    }
    println!("Total rows: {}", group_digits(summary.total_rows));
    if summary.failed > 0 {
        warn!(
            failed = summary.failed,
            "Some months were missing, the total may undercount"
        );
    }
    print_answer(summary.total_rows as f64, choices);
}
