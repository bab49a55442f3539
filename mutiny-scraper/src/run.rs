//! Run loop
//!
//! Walks the configured sources through their adapters and feeds the
//! pipeline. Failures are isolated per source: a source that errors
//! is logged and skipped, the run continues with the rest and still
//! produces a best-effort catalog. Per-source outcomes are aggregated
//! into a [`RunSummary`] instead of being swallowed.

use crate::adapters::AdapterRegistry;
use crate::pipeline::geocode::Geocoder;
use crate::pipeline::EnrichmentPipeline;
use chrono::NaiveDateTime;
use mutiny_common::config::SourcesConfig;
use mutiny_common::model::CatalogEvent;
use tracing::{info, warn};

/// Aggregated outcome of one run, for end-of-run logging.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub sources_ok: usize,
    pub sources_failed: usize,
    pub records_seen: usize,
    pub keyword_rejected: usize,
    pub duplicates: usize,
    pub events: usize,
}

/// Everything a run produces: the final catalog events plus the
/// summary.
pub struct RunOutcome {
    pub events: Vec<CatalogEvent>,
    pub summary: RunSummary,
}

/// Execute one full run: ingest every enabled source, enrich, filter
/// against `reference`.
pub async fn execute(
    config: &SourcesConfig,
    registry: &AdapterRegistry,
    geocoder: Box<dyn Geocoder>,
    reference: NaiveDateTime,
) -> RunOutcome {
    let keyword_filter = config.keyword_filter();
    let mut pipeline = EnrichmentPipeline::new(geocoder);
    let mut summary = RunSummary::default();

    for source in config.sources.iter().filter(|s| s.enabled) {
        let Some(adapter) = registry.get(&source.adapter) else {
            warn!(
                source_id = %source.id,
                source = %source.name,
                adapter = %source.adapter,
                "no adapter registered for source; skipping"
            );
            summary.sources_failed += 1;
            continue;
        };

        info!(source = %source.name, "scraping source");
        match adapter.fetch(source).await {
            Ok(records) => {
                summary.sources_ok += 1;
                for record in records {
                    summary.records_seen += 1;
                    if source.filter_keywords && !keyword_filter.matches(&record.title) {
                        summary.keyword_rejected += 1;
                        continue;
                    }
                    if !pipeline.ingest(record) {
                        summary.duplicates += 1;
                    }
                }
            }
            Err(e) => {
                warn!(source = %source.name, error = %e, "source failed; continuing");
                summary.sources_failed += 1;
            }
        }
    }

    info!(accepted = pipeline.accepted_count(), "enriching events");
    let events = pipeline.finish(reference).await;
    summary.events = events.len();

    info!(
        sources_ok = summary.sources_ok,
        sources_failed = summary.sources_failed,
        records_seen = summary.records_seen,
        keyword_rejected = summary.keyword_rejected,
        duplicates = summary.duplicates,
        events = summary.events,
        "run complete"
    );

    RunOutcome { events, summary }
}
