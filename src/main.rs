//! Docs-Mirror main entry point
//!
//! This is the command-line interface for the Docs-Mirror documentation crawler.

use anyhow::Context;
use clap::Parser;
use docs_mirror::config::{load_config_with_hash, Config};
use docs_mirror::crawler::Coordinator;
use docs_mirror::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Docs-Mirror: mirror a documentation site as Markdown
///
/// Docs-Mirror reads the navigation tree of a documentation site, fetches
/// every page it links to, and writes each page's main content as a Markdown
/// file in a directory layout mirroring the site.
#[derive(Parser, Debug)]
#[command(name = "docs-mirror")]
#[command(version = "1.0.0")]
#[command(about = "Mirror a documentation site as Markdown", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Discover pages and show where they would be written without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(output) = cli.output {
        config.output.output_dir = output.to_string_lossy().into_owned();
    }

    if cli.dry_run {
        handle_dry_run(config).await
    } else {
        handle_crawl(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docs_mirror=info,warn"),
            1 => EnvFilter::new("docs_mirror=debug,info"),
            2 => EnvFilter::new("docs_mirror=trace,debug"),
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

/// Handles the --dry-run mode: discovers pages and prints the link set
async fn handle_dry_run(config: Config) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config)?;
    let links = coordinator.discover().await?;

    println!("=== Docs-Mirror Dry Run ===\n");
    println!("Output directory: {}", coordinator.output_root().display());
    println!("Pages ({}):", links.len());
    for (url, path) in links.iter() {
        println!("  {} -> {}", url, path.document_path());
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Mirroring {} into {}",
        config.seed_url(),
        config.output.output_dir
    );

    let coordinator = Coordinator::new(config)?;
    let stats = coordinator.run().await?;

    print_statistics(&stats);
    Ok(())
}
