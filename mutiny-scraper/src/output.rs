//! Catalog output
//!
//! Thin wrapper serializing the final event set plus a last-updated
//! timestamp to pretty-printed JSON. Unlike everything upstream, a
//! failure here is fatal to the run.

use chrono::Local;
use mutiny_common::model::{Catalog, CatalogEvent};
use mutiny_common::Result;
use std::path::Path;
use tracing::info;

/// Write the catalog document to `path`.
pub fn write_catalog(path: &Path, events: Vec<CatalogEvent>) -> Result<()> {
    let catalog = Catalog {
        last_updated: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        events,
    };
    let json = serde_json::to_string_pretty(&catalog)?;
    std::fs::write(path, json)?;
    info!(
        path = %path.display(),
        events = catalog.events.len(),
        "catalog written"
    );
    Ok(())
}
