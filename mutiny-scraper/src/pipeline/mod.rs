//! Normalization and enrichment pipeline
//!
//! Sequences the per-record stages over the full record set: dedup at
//! ingestion, then location resolution and feature tagging per
//! accepted record, then one temporal-filter pass over the whole
//! enriched set. All run state (seen dedup keys, geocode cache,
//! accumulated records) lives in the pipeline value, which is built
//! for one run and discarded afterwards.

pub mod dedup;
pub mod features;
pub mod geocode;
pub mod temporal;

use chrono::NaiveDateTime;
use dedup::Deduplicator;
use geocode::{Geocoder, LocationResolver};
use mutiny_common::model::{CatalogEvent, RawEventRecord};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Orchestrates one enrichment run. Strictly sequential: one record
/// at a time, in ingestion order.
pub struct EnrichmentPipeline {
    dedup: Deduplicator,
    resolver: LocationResolver,
    accepted: Vec<RawEventRecord>,
}

impl EnrichmentPipeline {
    pub fn new(geocoder: Box<dyn Geocoder>) -> Self {
        Self {
            dedup: Deduplicator::new(),
            resolver: LocationResolver::new(geocoder),
            accepted: Vec::new(),
        }
    }

    /// Number of records accepted so far.
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    /// Offer a record to the pipeline. Returns false if it duplicates
    /// an already-accepted record (first-seen wins).
    pub fn ingest(&mut self, record: RawEventRecord) -> bool {
        if !self.dedup.accept(&record) {
            debug!(title = %record.title, "duplicate record rejected");
            return false;
        }
        self.accepted.push(record);
        true
    }

    /// Enrich every accepted record, then apply the temporal filter
    /// over the whole set in original order. Consumes the pipeline;
    /// run state does not outlive the run.
    pub async fn finish(mut self, reference: NaiveDateTime) -> Vec<CatalogEvent> {
        let records = std::mem::take(&mut self.accepted);
        let mut enriched = Vec::with_capacity(records.len());
        for record in records {
            enriched.push(self.enrich_record(record).await);
        }
        temporal::filter_past(enriched, reference)
    }

    /// Resolve location, backfill description/organizer, tag
    /// features over the finalized description, and assign the
    /// stable id.
    async fn enrich_record(&mut self, record: RawEventRecord) -> CatalogEvent {
        let (venue, address) = match &record.location {
            Some(location) => (location.name.as_deref(), location.address.as_deref()),
            None => (None, None),
        };
        let location = self
            .resolver
            .resolve(address, venue, &record.title)
            .await;

        let description = record
            .description
            .unwrap_or_else(|| format!("Entrepreneur event: {}", record.title));
        let features = features::extract(&record.title, &description, record.captain_forged);

        let organizer = record.organizer.unwrap_or_else(|| record.source.clone());
        let id = stable_id(&record.title, record.date.as_deref().unwrap_or(""));

        CatalogEvent {
            title: record.title,
            description,
            url: record.url,
            date: record.date,
            source: record.source,
            organizer,
            location,
            features,
            id,
        }
    }
}

/// Deterministic event id: SHA-256 of title + date, truncated.
/// Collisions across distinct title/date pairs are theoretically
/// possible and accepted.
fn stable_id(title: &str, date: &str) -> String {
    let hash = Sha256::digest(format!("{}{}", title, date).as_bytes());
    format!("{:x}", hash)[..16].to_string()
}
