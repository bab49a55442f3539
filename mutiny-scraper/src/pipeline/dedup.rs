//! Duplicate record rejection
//!
//! The dedup key is the literal concatenation of title and date,
//! with no case, whitespace, or punctuation normalization. Two
//! records are duplicates iff both fields match exactly. This is
//! intentionally conservative: loosening the key could merge
//! legitimately distinct events (same title, slightly different
//! date formatting from another source).

use mutiny_common::model::RawEventRecord;
use std::collections::HashSet;

/// Run-scoped duplicate gate. First-seen wins; the key set is
/// write-once for the lifetime of one run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true iff the record's title/date pair has not been
    /// seen this run. A rejected record leaves no trace; an accepted
    /// one permanently claims its key.
    pub fn accept(&mut self, record: &RawEventRecord) -> bool {
        let key = Self::key(record);
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key);
        true
    }

    fn key(record: &RawEventRecord) -> String {
        format!("{}{}", record.title, record.date.as_deref().unwrap_or(""))
    }
}
