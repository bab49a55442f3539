//! End-to-end run tests: configuration through adapters, pipeline,
//! and summary, with a stub geocoder standing in for Nominatim.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use mutiny_common::config::SourcesConfig;
use mutiny_common::Result;
use mutiny_scraper::adapters::AdapterRegistry;
use mutiny_scraper::pipeline::geocode::{GeocodedPoint, Geocoder};
use mutiny_scraper::run;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingGeocoder {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Geocoder for CountingGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Option<GeocodedPoint>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(GeocodedPoint {
            lat: 39.9784,
            lng: -86.1180,
            display_name: "1 Main St, Carmel, Hamilton County, Indiana".to_string(),
        }))
    }
}

fn config() -> SourcesConfig {
    serde_json::from_str(
        r#"{
            "sources": [
                {
                    "id": "verge-curated",
                    "name": "The Verge",
                    "adapter": "curated",
                    "captainForged": true,
                    "filter_keywords": false,
                    "events": [
                        {
                            "title": "Founder Happy Hour",
                            "date": "2099-06-05T17:00:00",
                            "location": {"address": "1 Main St, Carmel"}
                        },
                        {
                            "title": "Founder Happy Hour",
                            "date": "2099-06-05T17:00:00",
                            "location": {"address": "1 Main St, Carmel"}
                        },
                        {
                            "title": "Board Meeting",
                            "date": "2099-06-06T09:00:00",
                            "location": {"address": "  1 MAIN ST, CARMEL "}
                        },
                        {
                            "title": "1 Million Cups Indianapolis",
                            "date": "TBD"
                        },
                        {
                            "title": "Old Gala",
                            "date": "2020-01-01T19:00:00"
                        }
                    ]
                },
                {
                    "id": "techpoint",
                    "name": "TechPoint",
                    "adapter": "rss",
                    "url": "https://example.com/feed"
                },
                {
                    "id": "community",
                    "name": "Community Calendar",
                    "adapter": "curated",
                    "events": [
                        {"title": "Startup Pitch Night", "date": "2099-03-01T18:00:00"},
                        {"title": "Quilting Circle", "date": "2099-03-02T18:00:00"}
                    ]
                }
            ],
            "keywords": ["startup", "founder", "pitch"],
            "excluded_keywords": []
        }"#,
    )
    .unwrap()
}

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 8)
        .unwrap()
        .and_time(NaiveTime::MIN)
}

#[tokio::test]
async fn full_run_produces_best_effort_catalog() {
    let calls = Arc::new(AtomicUsize::new(0));
    let geocoder = Box::new(CountingGeocoder {
        calls: calls.clone(),
    });

    let outcome = run::execute(
        &config(),
        &AdapterRegistry::with_defaults(),
        geocoder,
        reference(),
    )
    .await;

    // Unregistered adapter counts as a failed source, run continues.
    assert_eq!(outcome.summary.sources_ok, 2);
    assert_eq!(outcome.summary.sources_failed, 1);
    assert_eq!(outcome.summary.records_seen, 7);
    assert_eq!(outcome.summary.duplicates, 1);
    assert_eq!(outcome.summary.keyword_rejected, 1);
    assert_eq!(outcome.summary.events, 4);

    // Two records share one normalized address: one external call.
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let titles: Vec<&str> = outcome.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Founder Happy Hour",
            "Board Meeting",
            "1 Million Cups Indianapolis",
            "Startup Pitch Night",
        ]
    );
}

#[tokio::test]
async fn enrichment_invariants_hold_for_every_event() {
    let calls = Arc::new(AtomicUsize::new(0));
    let outcome = run::execute(
        &config(),
        &AdapterRegistry::with_defaults(),
        Box::new(CountingGeocoder { calls }),
        reference(),
    )
    .await;

    for event in &outcome.events {
        assert!(!event.id.is_empty(), "{} has no id", event.title);
        assert!(!event.organizer.is_empty());
        assert!(!event.location.address.is_empty());
        assert!(event.location.lat != 0.0);
    }

    let happy_hour = &outcome.events[0];
    assert!(happy_hour.features.captain_forged);
    assert!(happy_hour.features.alcohol_drinks);
    assert_eq!(happy_hour.organizer, "The Verge");
    assert_eq!(happy_hour.location.lat, 39.9784);

    // No address, city name in title: centroid fallback.
    let one_mc = &outcome.events[2];
    assert_eq!(one_mc.location.name, "Indianapolis");
    assert_eq!(one_mc.location.lat, 39.7684);
    assert!(one_mc.features.non_alcohol_drinks);

    // No address, no city in title: Indianapolis default.
    let pitch = &outcome.events[3];
    assert_eq!(pitch.location.address, "Indianapolis, IN");
    assert!(!pitch.features.captain_forged);
}
