//! Source adapters
//!
//! Each adapter turns one configured source into raw event records.
//! Sources select their adapter through an explicit registry keyed by
//! a stable adapter id (the `adapter` field in `sources.json`); a
//! source naming an unregistered adapter is skipped with a warning,
//! never guessed at.
//!
//! Adapter contract: `title` is non-empty, `date` (if present) is a
//! parseable date/time string or `"TBD"`, `location.address` (if
//! present) is free text.

pub mod curated;

use async_trait::async_trait;
use mutiny_common::config::SourceConfig;
use mutiny_common::model::RawEventRecord;
use mutiny_common::Result;
use std::collections::HashMap;

/// One way of extracting raw event records from a source.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Stable registry key, referenced by source configuration.
    fn id(&self) -> &'static str;

    /// Produce zero or more raw records for the source. A failed
    /// record should be skipped, not fail the whole source.
    async fn fetch(&self, source: &SourceConfig) -> Result<Vec<RawEventRecord>>;
}

/// Registry mapping adapter ids to implementations.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<&'static str, Box<dyn SourceAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in adapter.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(curated::CuratedAdapter));
        registry
    }

    pub fn register(&mut self, adapter: Box<dyn SourceAdapter>) {
        self.adapters.insert(adapter.id(), adapter);
    }

    pub fn get(&self, id: &str) -> Option<&dyn SourceAdapter> {
        self.adapters.get(id).map(|adapter| adapter.as_ref())
    }
}
