//! mutiny-scraper - Event Aggregation CLI
//!
//! Loads the sources configuration, runs every enabled source through
//! its adapter and the enrichment pipeline, and writes the resulting
//! catalog to disk. Only two errors are fatal: an unloadable sources
//! file and a failed catalog write; everything else degrades
//! per-source or per-record and is reported through log lines.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mutiny_common::config::SourcesConfig;
use mutiny_scraper::adapters::AdapterRegistry;
use mutiny_scraper::pipeline::geocode::NominatimClient;
use mutiny_scraper::{output, run};

#[derive(Parser)]
#[command(name = "mutiny-scraper", about = "Aggregate event listings into a geocoded catalog")]
struct Args {
    /// Path to the sources configuration
    #[arg(long, default_value = "sources.json")]
    sources: PathBuf,

    /// Path to write the event catalog
    #[arg(long, default_value = "events.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Starting mutiny-scraper");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = SourcesConfig::load(&args.sources)
        .with_context(|| format!("failed to load {}", args.sources.display()))?;

    let registry = AdapterRegistry::with_defaults();
    let geocoder = Box::new(NominatimClient::new());

    let outcome = run::execute(
        &config,
        &registry,
        geocoder,
        chrono::Local::now().naive_local(),
    )
    .await;

    output::write_catalog(&args.output, outcome.events)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        events = outcome.summary.events,
        "scrape completed successfully"
    );
    Ok(())
}
