//! comps CLI binary.
//!
//! Reads a ticker watchlist from a workbook, fetches fundamentals for each
//! ticker and writes the valuation table back as a `Stock Data` sheet.

use clap::Parser;
use comps::{BatchOutcome, Watchlist, WatchlistError, collect_records};
use comps_data::{DataError, YahooConfig, YahooFundamentalsProvider};
use comps_output::{ExportError, ExportFormat, Exporter, write_stock_data};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "comps")]
#[command(about = "comps: comparable-company valuation sheets", long_about = None)]
#[command(version)]
struct Cli {
    /// Workbook holding the watchlist (first sheet, column A, from row 3)
    #[arg(long, default_value = "Book1.xlsx")]
    input: PathBuf,

    /// Workbook to write the Stock Data sheet to (default: the input)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pause between tickers in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Also export the table as CSV or JSON (chosen by extension)
    #[arg(long)]
    export: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Watchlist(#[from] WatchlistError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("progress bar template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let output = cli.output.clone().unwrap_or_else(|| cli.input.clone());
    // Fail on a bad extension before spending time on the network.
    let export_format = cli.export.as_deref().map(ExportFormat::from_path).transpose()?;

    info!(path = %cli.input.display(), "loading watchlist");
    let watchlist = Watchlist::from_workbook(&cli.input)?;
    info!(tickers = watchlist.len(), "watchlist loaded");

    let provider = YahooFundamentalsProvider::with_config(YahooConfig {
        rate_limit_delay: Duration::from_millis(cli.delay_ms),
        timeout: Duration::from_secs(cli.timeout_secs),
        ..YahooConfig::default()
    })?;

    let pb = if cli.no_progress {
        None
    } else {
        Some(progress_bar(watchlist.len())?)
    };

    let BatchOutcome { records, summary } =
        collect_records(&provider, &watchlist, pb.as_ref()).await;

    if let Some(pb) = &pb {
        pb.finish_with_message(format!("{} records", records.len()));
    }

    write_stock_data(&output, &records)?;

    if let (Some(path), Some(format)) = (&cli.export, export_format) {
        records.export_to_file(path, format)?;
        info!(path = %path.display(), "exported table");
    }

    println!("Data extraction completed and saved to {}.", output.display());
    println!("{summary}");
    Ok(())
}

fn progress_bar(len: usize) -> Result<ProgressBar, AppError> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
