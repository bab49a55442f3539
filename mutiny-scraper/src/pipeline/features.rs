//! Heuristic amenity tagging
//!
//! Derives the boolean feature set from lower-cased title +
//! description text by independent keyword-set membership. This is a
//! heuristic classifier, not a parser: false positives and negatives
//! are expected, the contract is determinism.
//!
//! Direct keyword checks run before contextual ones and short-circuit
//! them; that order decides which keyword wins attribution in
//! ambiguous text and must not be reordered.

use mutiny_common::model::FeatureSet;

const FREE_KEYWORDS: &[&str] = &["free", "no cost", "complimentary", "no charge", "$0"];

const FOOD_KEYWORDS: &[&str] = &[
    "dinner",
    "lunch",
    "breakfast",
    "meal",
    "catering",
    "buffet",
    "food provided",
    "pizza",
    "sandwiches",
];

/// Event types that typically serve food even when none is named.
const FOOD_EVENT_TYPES: &[&str] = &[
    "breakfast",
    "brunch",
    "lunch",
    "dinner",
    "banquet",
    "feast",
    "potluck",
    "pitch-in",
    "restaurant",
    "steakhouse",
    "bistro",
    "cafe",
];

const APPETIZER_KEYWORDS: &[&str] = &[
    "appetizer",
    "snacks",
    "light refreshments",
    "hors",
    "finger food",
    "apps",
];

/// Networking events are assumed to serve snacks.
const NETWORKING_KEYWORDS: &[&str] =
    &["networking", "mixer", "meetup", "social", "reception"];

const NONALC_KEYWORDS: &[&str] = &[
    "coffee",
    "refreshments",
    "beverages",
    "soft drink",
    "water",
    "soda",
    "juice",
];

/// Coffee-adjacent event types.
const COFFEE_EVENT_KEYWORDS: &[&str] = &["coffee", "1 million cups", "morning", "cowork"];

const ALCOHOL_KEYWORDS: &[&str] = &[
    "happy hour",
    "beer",
    "wine",
    "cocktails",
    "bar",
    "drinks",
    "alcohol",
    "brewery",
    "spirits",
    "party",
];

/// Derive the feature set for one event. `captain_forged` passes
/// through unchanged.
pub fn extract(title: &str, description: &str, captain_forged: bool) -> FeatureSet {
    let text = format!("{} {}", title.to_lowercase(), description.to_lowercase());
    let has = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    let free = has(FREE_KEYWORDS);

    let mut food = has(FOOD_KEYWORDS);
    if !food {
        food = has(FOOD_EVENT_TYPES);
    }

    let mut appetizers = has(APPETIZER_KEYWORDS);
    if !appetizers {
        appetizers = has(NETWORKING_KEYWORDS);
    }

    let mut non_alcohol_drinks = has(NONALC_KEYWORDS);
    if !non_alcohol_drinks {
        non_alcohol_drinks = has(COFFEE_EVENT_KEYWORDS);
    }

    let alcohol_drinks = has(ALCOHOL_KEYWORDS);

    FeatureSet {
        free,
        food,
        appetizers,
        non_alcohol_drinks,
        alcohol_drinks,
        captain_forged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_independent() {
        let features = extract("Free networking mixer with coffee and beer", "", false);
        assert!(features.free);
        assert!(!features.food);
        assert!(features.appetizers);
        assert!(features.non_alcohol_drinks);
        assert!(features.alcohol_drinks);
        assert!(!features.captain_forged);
    }

    #[test]
    fn contextual_food_fires_only_without_direct_match() {
        // "bistro" is contextual only.
        let features = extract("Founder dinner at the bistro", "", false);
        assert!(features.food);
        let features = extract("Evening at the bistro", "", false);
        assert!(features.food);
        let features = extract("Quarterly planning session", "", false);
        assert!(!features.food);
    }

    #[test]
    fn description_text_participates() {
        let features = extract(
            "Startup Office Hours",
            "Light refreshments and soda provided. No cost to attend.",
            false,
        );
        assert!(features.free);
        assert!(features.appetizers);
        assert!(features.non_alcohol_drinks);
        assert!(!features.alcohol_drinks);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let features = extract("HAPPY HOUR at the BREWERY", "", false);
        assert!(features.alcohol_drinks);
    }

    #[test]
    fn captain_forged_passes_through() {
        assert!(extract("Anything", "", true).captain_forged);
        assert!(!extract("Anything", "", false).captain_forged);
    }

    #[test]
    fn same_text_same_tags() {
        let a = extract("1 Million Cups Fishers", "Weekly founder coffee", false);
        let b = extract("1 Million Cups Fishers", "Weekly founder coffee", false);
        assert_eq!(a, b);
        assert!(a.non_alcohol_drinks);
    }
}
