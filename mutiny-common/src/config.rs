//! Sources configuration loading
//!
//! The scraper is driven by a single JSON document (`sources.json`)
//! listing the sources to poll plus the keyword lists used to decide
//! whether a scraped title is relevant. Failing to load this file is
//! the only fatal error in a run; everything downstream degrades
//! per-source or per-record.

use crate::model::RawEventRecord;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Top-level sources configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub excluded_keywords: Vec<String>,
}

/// One configured source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable identifier, used for logging and registry diagnostics.
    pub id: String,
    /// Display name; becomes the `source` field of scraped records.
    pub name: String,
    /// Registry key selecting the adapter implementation.
    pub adapter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Marks every record from this source as founder-sourced.
    #[serde(default, rename = "captainForged")]
    pub captain_forged: bool,
    /// Whether scraped titles must pass the keyword filter. Curated
    /// sources typically disable this.
    #[serde(default = "default_true")]
    pub filter_keywords: bool,
    /// Inline records for curated sources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<RawEventRecord>,
}

fn default_true() -> bool {
    true
}

impl SourcesConfig {
    /// Load the configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: SourcesConfig = serde_json::from_str(&text).map_err(|e| {
            Error::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        info!(
            sources = config.sources.len(),
            keywords = config.keywords.len(),
            "sources configuration loaded"
        );
        Ok(config)
    }

    /// Build the keyword filter from the configured lists.
    pub fn keyword_filter(&self) -> KeywordFilter {
        KeywordFilter::new(&self.keywords, &self.excluded_keywords)
    }
}

/// Case-insensitive substring matcher over the configured keyword
/// lists. Excluded keywords veto a match before the include list is
/// consulted.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
    excluded: Vec<String>,
}

impl KeywordFilter {
    pub fn new(keywords: &[String], excluded: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            excluded: excluded.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// True iff `text` hits at least one keyword and no excluded
    /// keyword.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        if self.excluded.iter().any(|k| text.contains(k)) {
            return false;
        }
        self.keywords.iter().any(|k| text.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "sources": [
            {
                "id": "verge-curated",
                "name": "The Verge",
                "adapter": "curated",
                "captainForged": true,
                "filter_keywords": false,
                "events": [
                    {"title": "Founder Happy Hour", "date": "2025-06-05T17:00:00"}
                ]
            },
            {
                "id": "techpoint",
                "name": "TechPoint",
                "adapter": "ical",
                "url": "https://example.com/events.ics"
            }
        ],
        "keywords": ["startup", "entrepreneur", "pitch"],
        "excluded_keywords": ["webinar replay"]
    }"#;

    #[test]
    fn parses_sources_document() {
        let config: SourcesConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.sources.len(), 2);

        let curated = &config.sources[0];
        assert!(curated.captain_forged);
        assert!(!curated.filter_keywords);
        assert_eq!(curated.events.len(), 1);
        assert_eq!(curated.events[0].title, "Founder Happy Hour");

        let scraped = &config.sources[1];
        assert!(scraped.enabled);
        assert!(scraped.filter_keywords);
        assert!(!scraped.captain_forged);
        assert!(scraped.events.is_empty());
    }

    #[test]
    fn load_reads_file_and_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = SourcesConfig::load(file.path()).unwrap();
        assert_eq!(config.keywords.len(), 3);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        bad.write_all(b"not json").unwrap();
        assert!(SourcesConfig::load(bad.path()).is_err());
    }

    #[test]
    fn keyword_filter_exclusion_wins() {
        let filter = KeywordFilter::new(
            &["startup".to_string(), "pitch".to_string()],
            &["webinar replay".to_string()],
        );
        assert!(filter.matches("Startup Pitch Night"));
        assert!(filter.matches("STARTUP mixer"));
        assert!(!filter.matches("Startup Webinar Replay"));
        assert!(!filter.matches("Quilting club meeting"));
    }
}
