//! Bookcrawl main entry point
//!
//! Command-line interface for the book-catalog scraper.

use bookcrawl::config::{default_config, load_config, Config};
use bookcrawl::crawl::run_crawl;
use bookcrawl::output::{ConsolePreview, CsvExport, TabularSink};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bookcrawl: a book-catalog scraper
///
/// Crawls a paginated, multi-category book catalog, extracts one flat
/// record per book, and prints a tabular preview. Optionally exports the
/// full result set to CSV.
#[derive(Parser, Debug)]
#[command(name = "bookcrawl")]
#[command(version)]
#[command(about = "A book-catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Export the result set to this CSV file (overrides config)
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Show the effective configuration without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => default_config()?,
    };

    // CLI export path wins over the config file
    if let Some(path) = &cli.csv {
        config.output.csv_path = Some(path.display().to_string());
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookcrawl=info,warn"),
            1 => EnvFilter::new("bookcrawl=debug,info"),
            2 => EnvFilter::new("bookcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Bookcrawl Dry Run ===\n");

    println!("Crawl:");
    println!("  Base URL: {}", config.crawl.base_url);
    println!("  Category filters: {:?}", config.crawl.category_filters);
    println!("  Max pages per category: {}", config.crawl.max_pages);
    println!("  Settle timeout: {}ms", config.crawl.settle_timeout_ms);

    println!("\nUser Agent:");
    println!("  {}/{}", config.user_agent.name, config.user_agent.version);

    println!("\nOutput:");
    println!("  Preview rows: {}", config.output.preview_rows);
    match &config.output.csv_path {
        Some(path) => println!("  CSV export: {}", path),
        None => println!("  CSV export: disabled"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let preview_rows = config.output.preview_rows;
    let csv_path = config.output.csv_path.clone();

    let results = match run_crawl(config).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let mut preview = ConsolePreview::new(preview_rows);
    preview.write(&results)?;

    if let Some(path) = csv_path {
        let mut export = CsvExport::new(path);
        export.write(&results)?;
    }

    Ok(())
}
