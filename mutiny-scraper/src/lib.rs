//! mutiny-scraper - Event Aggregation Pipeline
//!
//! Aggregates event listings from many independent sources into a
//! single normalized, deduplicated, geocoded catalog (`events.json`).
//!
//! Flow: source adapters yield raw records → deduplication at
//! ingestion → location resolution and feature tagging per record →
//! temporal filter over the full set → catalog written to disk.

pub mod adapters;
pub mod output;
pub mod pipeline;
pub mod run;
