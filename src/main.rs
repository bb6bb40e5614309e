//! Sumi-Strand main entry point
//!
//! This is the command-line interface for the Sumi-Strand link crawler.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use sumi_strand::config::{load_config_with_hash, validate, Config, FetchErrorPolicy};
use sumi_strand::crawler::crawl;
use sumi_strand::output::ConsoleReporter;
use tracing_subscriber::EnvFilter;

/// Sumi-Strand: a single-domain link crawler
///
/// Starting from URL, Sumi-Strand follows every link that stays on the same
/// host and prints the links found on each page.
#[derive(Parser, Debug)]
#[command(name = "sumi-strand")]
#[command(version)]
#[command(about = "A single-domain link crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum number of concurrent workers [default: 1]
    #[arg(short = 'n', long = "threads", value_name = "N")]
    threads: Option<usize>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Keep crawling when a page fails to fetch instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Don't print statistics when the crawl finishes
    #[arg(long)]
    no_stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR - {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the crawl output.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_strand=info,warn"),
            1 => EnvFilter::new("sumi_strand=debug,info"),
            2 => EnvFilter::new("sumi_strand=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_configuration(&cli)?;

    if let Some(threads) = cli.threads {
        config.crawler.max_workers = threads;
    }
    if cli.keep_going {
        config.crawler.on_fetch_error = FetchErrorPolicy::Continue;
    }
    validate(&config)?;

    let mut reporter = ConsoleReporter::stdout().with_stats(!cli.no_stats);
    let summary = crawl(&cli.url, &config, &mut reporter).await?;

    tracing::info!(
        "Visited {} pages from {} ({} failed)",
        summary.visited.len(),
        summary.seed,
        summary.failed.len()
    );
    Ok(())
}

/// Loads the configuration file if one was given, otherwise the defaults
fn load_configuration(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let Some(path) = &cli.config else {
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}
