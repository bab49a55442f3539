//! Temporal filtering
//!
//! Drops events with a confirmed date more than the grace window in
//! the past. The policy fails open: records with no date, a `"TBD"`
//! sentinel, or an unparseable date are kept, since the policy cannot
//! be applied to data it doesn't have.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use mutiny_common::model::CatalogEvent;
use tracing::info;

/// How far in the past an event may be and still be published.
const GRACE_DAYS: i64 = 7;

/// Explicit marker for an unknown date.
const UNKNOWN_DATE: &str = "TBD";

/// Filter the enriched set, preserving order. `reference` is the
/// run's notion of "now".
pub fn filter_past(events: Vec<CatalogEvent>, reference: NaiveDateTime) -> Vec<CatalogEvent> {
    let cutoff = reference - Duration::days(GRACE_DAYS);
    let original_count = events.len();

    let kept: Vec<CatalogEvent> = events
        .into_iter()
        .filter(|event| match event.date.as_deref() {
            None => true,
            Some(UNKNOWN_DATE) => true,
            Some(date) => match parse_lenient(date) {
                // Fail open: an unparseable date is not a confirmed
                // past date.
                None => true,
                Some(parsed) => {
                    if parsed >= cutoff {
                        true
                    } else {
                        info!(
                            title = %event.title,
                            date = %date,
                            "filtered out past event"
                        );
                        false
                    }
                }
            },
        })
        .collect();

    let dropped = original_count - kept.len();
    if dropped > 0 {
        info!(dropped, "filtered out past events");
    }
    kept
}

/// Best-effort date parsing: RFC 3339 first, then a fixed list of
/// common datetime and date-only layouts.
pub fn parse_lenient(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_local());
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, format) {
            return Some(parsed.and_time(NaiveTime::MIN));
        }
    }

    None
}
