//! Curated source adapter
//!
//! Emits the records embedded directly in a source's configuration
//! entry. Used for founder-curated feeds where the events are
//! maintained by hand rather than scraped.

use super::SourceAdapter;
use async_trait::async_trait;
use mutiny_common::config::SourceConfig;
use mutiny_common::model::RawEventRecord;
use mutiny_common::Result;
use tracing::warn;

pub struct CuratedAdapter;

#[async_trait]
impl SourceAdapter for CuratedAdapter {
    fn id(&self) -> &'static str {
        "curated"
    }

    async fn fetch(&self, source: &SourceConfig) -> Result<Vec<RawEventRecord>> {
        let mut records = Vec::with_capacity(source.events.len());
        for entry in &source.events {
            if entry.title.trim().is_empty() {
                warn!(source = %source.name, "skipping curated entry without title");
                continue;
            }
            let mut record = entry.clone();
            record.source = source.name.clone();
            record.captain_forged = record.captain_forged || source.captain_forged;
            records.push(record);
        }
        Ok(records)
    }
}
