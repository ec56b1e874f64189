//! CLI binary for flipkart-live.
//!
//! Prints the search envelope as JSON on stdout. All tracing output goes to
//! stderr so that stdout stays machine-readable.

use clap::Parser;
use flipkart_live::AppConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Live Flipkart product search: scrape result pages and print products as JSON.
#[derive(Parser)]
#[command(name = "flipkart-live", version, about)]
struct Cli {
    /// Search query, e.g. "redmi note 12".
    query: String,

    /// Maximum number of products to return.
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Warnings and errors only by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flipkart_live=warn,flipkart_search=warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?.to_scrape_config()?;
    if let Some(max_results) = cli.max_results {
        config.max_results = max_results;
        config.validate()?;
    }

    let mut stdout = std::io::stdout().lock();
    let envelope = flipkart_live::run(&cli.query, &config, &mut stdout).await?;

    tracing::debug!(
        success = envelope.success,
        products = envelope.products.len(),
        "search finished"
    );
    Ok(())
}
