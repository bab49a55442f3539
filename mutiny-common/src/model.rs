//! Event data model
//!
//! Two shapes flow through the system: `RawEventRecord`, the common
//! output of every source adapter, and `CatalogEvent`, the enriched
//! record persisted to the output catalog. Wire names on the catalog
//! side are camelCase to match the published `events.json` format.

use serde::{Deserialize, Serialize};

/// A raw event as produced by a source adapter, before enrichment.
///
/// Adapters promise a non-empty `title`; every other field is best
/// effort. `date`, when present, is either a parseable date/time
/// string or the explicit `"TBD"` sentinel. The record is immutable
/// once handed to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEventRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Display name of the originating source. Adapters fill this in;
    /// curated config entries may omit it and inherit the source name.
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<RawLocation>,
    /// Founder-sourced marker, inherited by the final feature set.
    #[serde(default, rename = "captainForged")]
    pub captain_forged: bool,
}

/// Partial venue information attached to a raw record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A fully resolved venue. Always present on a catalog event; when
/// geocoding fails the pipeline substitutes a city centroid or the
/// Indianapolis default instead of leaving this empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// Amenity tags derived from event text by keyword heuristics.
///
/// Tags are independent; an event can be simultaneously free, food,
/// and alcohol. `captain_forged` is the one pass-through flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    pub free: bool,
    pub food: bool,
    pub appetizers: bool,
    pub non_alcohol_drinks: bool,
    pub alcohol_drinks: bool,
    pub captain_forged: bool,
}

/// The unit persisted to the output catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEvent {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub source: String,
    pub organizer: String,
    pub location: ResolvedLocation,
    pub features: FeatureSet,
    /// Stable identifier derived from title and date.
    pub id: String,
}

/// The output catalog document: a run timestamp plus the ordered
/// event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub last_updated: String,
    pub events: Vec<CatalogEvent>,
}
