//! CLI entry point for the bike rental dashboard.
//!
//! Loads the daily and hourly rental tables once, then reports or exports
//! the summaries for a selected year.

use anyhow::Result;
use bike_rental_dashboard::{
    config::DataPaths,
    dashboard::Dashboard,
    output::{export_dashboard, print_json, print_pretty, render_dashboard},
    store::RecordStore,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_rental_dashboard")]
#[command(about = "Explore bike rental volume by month, day type and hour type", long_about = None)]
struct Cli {
    /// Daily rentals CSV (falls back to DAY_DATA_PATH, then dayRent_data.csv)
    #[arg(long, global = true, value_name = "PATH")]
    day_data: Option<PathBuf>,

    /// Hourly rentals CSV (falls back to HOUR_DATA_PATH, then hourRent_data.csv)
    #[arg(long, global = true, value_name = "PATH")]
    hour_data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Terminal tables with text bar charts
    Pretty,
    /// Pretty-printed JSON
    Json,
    /// Rust debug representation, logged at debug level
    Debug,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the range of years that can be selected
    Years,
    /// Render the dashboard for a year
    Report {
        /// Year to report on
        #[arg(short, long)]
        year: i32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,

        /// Number of day types to chart
        #[arg(short, long, default_value_t = 5)]
        top: usize,
    },
    /// Write the summary tables for a year to CSV and JSON files
    Export {
        /// Year to export
        #[arg(short, long)]
        year: i32,

        /// Directory to write the files into
        #[arg(short, long, default_value = "summaries")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bike_rental_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_rental_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let paths = DataPaths::resolve(cli.day_data, cli.hour_data);
    let store = RecordStore::load(&paths.daily, &paths.hourly)?;

    match cli.command {
        Commands::Years => match store.year_range() {
            Some(range) => {
                info!(min = range.min, max = range.max, "Available years");
                for year in store.selectable_years() {
                    println!("{year}");
                }
            }
            None => warn!("No daily records loaded, no years available"),
        },
        Commands::Report { year, format, top } => {
            let dashboard = Dashboard::build(&store, year)?;

            match format {
                Format::Pretty => {
                    let color = std::io::stdout().is_terminal();
                    println!("{}", render_dashboard(&dashboard, top, color));
                }
                Format::Json => print_json(&dashboard)?,
                Format::Debug => print_pretty(&dashboard),
            }
        }
        Commands::Export { year, output_dir } => {
            let dashboard = Dashboard::build(&store, year)?;
            let written = export_dashboard(&dashboard, &output_dir)?;

            for path in &written {
                info!(path = %path.display(), "Wrote");
            }
        }
    }

    Ok(())
}
