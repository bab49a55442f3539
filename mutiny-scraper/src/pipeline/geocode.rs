//! Location resolution
//!
//! Resolves free-text venue/address data into coordinates, in
//! priority order: run-scoped geocode cache, external Nominatim
//! lookup, static city-centroid table keyed off the event title,
//! and finally the Indianapolis default. Geocoding failures are
//! logged and degrade to the fallbacks; they never abort a run.
//!
//! Nominatim is a shared free service rate limited to 1 request per
//! second. Every external call is spaced at least
//! [`RATE_LIMIT_INTERVAL`] apart; exceeding the budget risks a ban
//! for every consumer of the contact address below.

use async_trait::async_trait;
use mutiny_common::model::ResolvedLocation;
use mutiny_common::{Error, Result};
use reqwest::{header, Client};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Nominatim search endpoint (OpenStreetMap)
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Default timeout for geocoding requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum spacing between external calls (Nominatim usage policy
/// allows 1 req/sec; 1100ms leaves headroom)
const RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(1100);

/// User-Agent header (required by the Nominatim usage policy)
const USER_AGENT: &str = "Mutiny19 Event Scraper (contact: crew@mutiny19.com)";

/// Indianapolis centroid, the hard-coded last-resort location.
const DEFAULT_LAT: f64 = 39.7684;
const DEFAULT_LNG: f64 = -86.1581;

/// A single geocoded candidate: coordinates plus the provider's
/// canonical display address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPoint {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

/// External geocoding backend.
///
/// `Ok(None)` means the provider answered but had no candidates;
/// `Err` covers transport, status, and parse failures. The resolver
/// treats both as recoverable.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPoint>>;
}

/// Nominatim client with per-call rate limiting.
pub struct NominatimClient {
    http_client: Client,
    /// Rate limiter (last request time)
    rate_limiter: Mutex<Option<Instant>>,
}

impl NominatimClient {
    pub fn new() -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .default_headers(headers)
                .build()
                .expect("Failed to create HTTP client"),
            rate_limiter: Mutex::new(None),
        }
    }

    /// Sleep as needed to keep calls at least [`RATE_LIMIT_INTERVAL`]
    /// apart. The lock serializes callers, so concurrent resolution
    /// cannot exceed the provider budget.
    async fn enforce_rate_limit(&self) {
        let mut last_request = self.rate_limiter.lock().await;

        if let Some(last_time) = *last_request {
            let elapsed = last_time.elapsed();
            if elapsed < RATE_LIMIT_INTERVAL {
                let sleep_duration = RATE_LIMIT_INTERVAL - elapsed;
                debug!(
                    sleep_ms = sleep_duration.as_millis(),
                    "Rate limiting: sleeping before Nominatim request"
                );
                sleep(sleep_duration).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPoint>> {
        self.enforce_rate_limit().await;

        debug!(query, "Querying Nominatim");
        let response = self
            .http_client
            .get(NOMINATIM_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| Error::Geocode(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocode(format!(
                "Nominatim returned status {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| Error::Geocode(format!("Failed to parse Nominatim response: {}", e)))?;

        // Only the top-ranked candidate is used.
        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let lat: f64 = place
            .lat
            .parse()
            .map_err(|_| Error::Geocode(format!("bad latitude: {}", place.lat)))?;
        let lng: f64 = place
            .lon
            .parse()
            .map_err(|_| Error::Geocode(format!("bad longitude: {}", place.lon)))?;

        Ok(Some(GeocodedPoint {
            lat,
            lng,
            display_name: place.display_name,
        }))
    }
}

/// Nominatim serializes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// One cached resolution, keyed by normalized address text.
#[derive(Debug, Clone)]
struct CachedPlace {
    lat: f64,
    lng: f64,
    /// Canonical display address from the provider. Kept for
    /// diagnostics; catalog events carry the source's address text.
    #[allow(dead_code)]
    display_name: String,
}

/// Resolves raw address/venue/title data to a [`ResolvedLocation`].
///
/// Owns the run-scoped geocode cache: once an address resolves, the
/// external service is never re-contacted for the same normalized
/// address within the run.
pub struct LocationResolver {
    geocoder: Box<dyn Geocoder>,
    cache: HashMap<String, CachedPlace>,
}

impl LocationResolver {
    pub fn new(geocoder: Box<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            cache: HashMap::new(),
        }
    }

    /// Resolve a location, always succeeding. Priority: geocoded
    /// address, city-name match in the title, Indianapolis default.
    pub async fn resolve(
        &mut self,
        address: Option<&str>,
        venue: Option<&str>,
        title: &str,
    ) -> ResolvedLocation {
        if let Some(address) = address {
            if looks_complete(address) {
                if let Some(location) = self.resolve_address(address, venue).await {
                    return location;
                }
            }
        }

        if let Some(location) = city_from_title(title) {
            return location;
        }

        default_location()
    }

    /// Cache-then-network resolution of a complete-looking address.
    /// Returns None on any failure so the caller can fall back.
    async fn resolve_address(
        &mut self,
        address: &str,
        venue: Option<&str>,
    ) -> Option<ResolvedLocation> {
        let cache_key = address.trim().to_lowercase();
        let name = venue
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                address.split(',').next().unwrap_or(address).to_string()
            });

        if let Some(cached) = self.cache.get(&cache_key) {
            return Some(ResolvedLocation {
                name,
                address: address.to_string(),
                lat: cached.lat,
                lng: cached.lng,
            });
        }

        // Narrow the search to Indiana unless the text already says so.
        let lower = address.to_lowercase();
        let query = if lower.contains("indiana") || lower.contains(", in") {
            address.to_string()
        } else {
            format!("{}, Indiana", address)
        };

        match self.geocoder.geocode(&query).await {
            Ok(Some(point)) => {
                self.cache.insert(
                    cache_key,
                    CachedPlace {
                        lat: point.lat,
                        lng: point.lng,
                        display_name: point.display_name,
                    },
                );
                Some(ResolvedLocation {
                    name,
                    address: address.to_string(),
                    lat: point.lat,
                    lng: point.lng,
                })
            }
            Ok(None) => {
                debug!(address, "no geocoding candidates");
                None
            }
            Err(e) => {
                warn!(address, error = %e, "geocoding failed");
                None
            }
        }
    }
}

/// Heuristic for whether an address is worth geocoding: a comma or
/// at least three whitespace-separated tokens.
fn looks_complete(address: &str) -> bool {
    address.contains(',') || address.split_whitespace().count() >= 3
}

/// Scan the title for a known Indiana city; first table entry that
/// substring-matches wins.
fn city_from_title(title: &str) -> Option<ResolvedLocation> {
    let title = title.to_lowercase();
    for (city, lat, lng) in INDIANA_CITIES {
        if title.contains(city) {
            let display = title_case(city);
            return Some(ResolvedLocation {
                name: display.clone(),
                address: format!("{}, Indiana", display),
                lat: *lat,
                lng: *lng,
            });
        }
    }
    None
}

/// Last-resort location: the Indianapolis centroid.
fn default_location() -> ResolvedLocation {
    ResolvedLocation {
        name: "Indianapolis".to_string(),
        address: "Indianapolis, IN".to_string(),
        lat: DEFAULT_LAT,
        lng: DEFAULT_LNG,
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Centroids for Indiana cities likely to appear in event titles.
/// Table order matters: the first substring match wins.
const INDIANA_CITIES: &[(&str, f64, f64)] = &[
    ("indianapolis", 39.7684, -86.1581),
    ("fort wayne", 41.0793, -85.1394),
    ("evansville", 37.9747, -87.5558),
    ("south bend", 41.6764, -86.2520),
    ("carmel", 39.9784, -86.1180),
    ("fishers", 39.9567, -86.0139),
    ("bloomington", 39.1653, -86.5264),
    ("lafayette", 40.4167, -86.8753),
    ("west lafayette", 40.4259, -86.9081),
    ("muncie", 40.1934, -85.3864),
    ("terre haute", 39.4667, -87.4139),
    ("kokomo", 40.4864, -86.1336),
    ("anderson", 40.1053, -85.6803),
    ("noblesville", 40.0456, -86.0086),
    ("westfield", 40.0428, -86.1275),
    ("greenwood", 39.6136, -86.1067),
    ("columbus", 39.2014, -85.9214),
    ("jeffersonville", 38.2776, -85.7372),
    ("new albany", 38.2856, -85.8241),
    ("valparaiso", 41.4731, -87.0611),
    ("hammond", 41.5833, -87.5000),
    ("gary", 41.5934, -87.3464),
    ("elkhart", 41.6820, -85.9767),
    ("mishawaka", 41.6614, -86.1586),
    ("goshen", 41.5823, -85.8347),
    ("plainfield", 39.7042, -86.3994),
    ("greenfield", 39.7851, -85.7694),
    ("richmond", 39.8289, -84.8902),
    ("logansport", 40.7545, -86.3567),
    ("marion", 40.5584, -85.6591),
    ("michigan city", 41.7075, -86.8950),
    ("crown point", 41.4170, -87.3653),
    ("munster", 41.5645, -87.5125),
    ("dyer", 41.4942, -87.5217),
    ("merrillville", 41.4828, -87.3328),
    ("odon", 38.8417, -86.9917),
    ("lawrence", 39.8386, -85.9936),
    ("newberry", 38.9167, -87.0333),
    ("french lick", 38.5489, -86.6197),
    ("bedford", 38.8611, -86.4872),
    ("jasper", 38.3914, -86.9311),
    ("vincennes", 38.6773, -87.5286),
    ("washington", 38.6592, -87.1728),
    ("scottsburg", 38.6856, -85.7703),
    ("seymour", 38.9592, -85.8903),
];
