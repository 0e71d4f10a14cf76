//! Fossick main entry point
//!
//! This is the command-line interface for the Fossick link prospector.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use fossick::config::{load_config_or_default, SearchConfig, SearchOptions};
use fossick::output::{log_summary, sink_for, DownloadSink, OutputSink, RunSummary};
use fossick::pipeline::build_probe_client;
use fossick::ResultAggregator;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Fossick: search engine link prospector
///
/// Fossick sends one query to the Bing Web Search API and/or a Google
/// Custom Search Engine, checks the HTTP status of every returned link and
/// prints the results or writes them to CSV.
#[derive(Parser, Debug)]
#[command(name = "fossick")]
#[command(version = "1.0.0")]
#[command(about = "Search engine link prospector", long_about = None)]
struct Cli {
    /// Search query to send to every configured engine
    #[arg(short = 's', long)]
    search_query: String,

    /// Google Custom Search API key (-ga)
    #[arg(long, value_name = "KEY")]
    google_api: Option<String>,

    /// Google Custom Search engine ID (-gc)
    #[arg(long, value_name = "CX")]
    google_cse: Option<String>,

    /// Bing Web Search subscription key (-bk)
    #[arg(long, value_name = "KEY")]
    bing_key: Option<String>,

    /// Write results to a CSV file instead of the console
    #[arg(short = 'w', long)]
    write_csv: bool,

    /// Download the content of every reachable link
    #[arg(short = 'd', long)]
    download: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to an optional TOML settings file
    #[arg(short = 'c', long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            search_query: self.search_query.clone(),
            google_api: self.google_api.clone(),
            google_cse: self.google_cse.clone(),
            bing_key: self.bing_key.clone(),
            write_csv: self.write_csv,
            download: self.download,
        }
    }
}

/// Two-letter short flags clap cannot express natively
const SHORT_ALIASES: [(&str, &str); 3] = [
    ("-ga", "--google-api"),
    ("-gc", "--google-cse"),
    ("-bk", "--bing-key"),
];

/// Rewrites `-ga`, `-gc` and `-bk` (including the `-ga=KEY` form) to their
/// long equivalents. Everything after a bare `--` is left untouched.
fn expand_short_aliases<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut expanded = Vec::new();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            expanded.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            expanded.push(arg);
            continue;
        }

        let (flag, value) = match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (arg.as_str(), None),
        };

        match SHORT_ALIASES.iter().find(|(short, _)| *short == flag) {
            Some((_, long)) => match value {
                Some(value) => expanded.push(format!("{}={}", long, value)),
                None => expanded.push((*long).to_string()),
            },
            None => expanded.push(arg),
        }
    }

    expanded
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(expand_short_aliases(std::env::args()));

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    match handle_search(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}

/// Formats a fatal error for stderr
fn error_line(error: &anyhow::Error) -> String {
    format!("[!] Error: {:#}", error)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only results.
fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("fossick=error"),
        1 => EnvFilter::new("fossick=info"),
        2 => EnvFilter::new("fossick=debug"),
        _ => EnvFilter::new("fossick=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the main search operation
async fn handle_search(cli: Cli) -> anyhow::Result<()> {
    let started_at = Utc::now();
    tracing::info!("[i] Fossick v{}", env!("CARGO_PKG_VERSION"));

    // Load and validate configuration
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let settings = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let config = SearchConfig::new(cli.search_options(), settings)
        .context("Invalid search options")?;

    let aggregator = ResultAggregator::from_config(&config)?;
    tracing::info!(
        "Engines: {}",
        aggregator
            .engines()
            .iter()
            .map(|e| e.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let report = aggregator.run(config.query()).await?;

    let mut sink = sink_for(&config);
    sink.write(&report.results)
        .context("Failed to write results")?;

    let mut summary = RunSummary::from_results(started_at, &report.results, report.warnings.len());

    if config.download() {
        let client = build_probe_client(&config.settings().http)?;
        let downloader = DownloadSink::new(client, config.download_dir());
        let downloads = downloader
            .download_all(&report.results)
            .await
            .with_context(|| {
                format!(
                    "Failed to prepare download directory {}",
                    downloader.dir().display()
                )
            })?;
        summary = summary.with_downloads(downloads);
    }

    log_summary(&summary);

    Ok(())
}
