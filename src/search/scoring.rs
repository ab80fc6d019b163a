use chrono::{DateTime, Utc};

use crate::listings::Listing;
use crate::query::models::QueryIntent;
use crate::text::{contains_word, normalize};

// Title relevance dominates: an exact term in the title is worth two
// description hits and four synonym hits.
pub const TITLE_TERM_SCORE: f64 = 20.0;
pub const DESCRIPTION_TERM_SCORE: f64 = 10.0;
pub const SYNONYM_TERM_SCORE: f64 = 5.0;
pub const CATEGORY_MATCH_SCORE: f64 = 15.0;
pub const LOCATION_MATCH_SCORE: f64 = 10.0;
pub const ACTIVE_BONUS: f64 = 5.0;
pub const HISTORICAL_PENALTY: f64 = -10.0;

/// Relevance of one listing against one intent. Pure: `now` is injected
/// so freshness scoring stays deterministic under test.
pub fn score_listing(listing: &Listing, intent: &QueryIntent, now: DateTime<Utc>) -> f64 {
    let title = normalize(&listing.title);
    let description = normalize(&listing.description);

    let mut score = 0.0;

    // A term found in the title never double-counts as a description match
    for term in &intent.raw_terms {
        if contains_word(&title, term) {
            score += TITLE_TERM_SCORE;
        } else if contains_word(&description, term) {
            score += DESCRIPTION_TERM_SCORE;
        }
    }

    for term in intent
        .expanded_terms
        .iter()
        .filter(|term| !intent.raw_terms.contains(term))
    {
        if contains_word(&title, term) || contains_word(&description, term) {
            score += SYNONYM_TERM_SCORE;
        }
    }

    if intent.primary_category == Some(listing.category) {
        score += CATEGORY_MATCH_SCORE;
    }

    if let Some(place) = &intent.location {
        let location_text = normalize(&listing.location.search_text());
        if contains_word(&location_text, &normalize(&place.name)) {
            score += LOCATION_MATCH_SCORE;
        }
    }

    score += freshness_score(listing.published_at, now);

    if listing.is_active {
        score += ACTIVE_BONUS;
    }
    if listing.is_historical {
        score += HISTORICAL_PENALTY;
    }

    score
}

/// Classifieds decay fast: full bonus under three days, nothing past a
/// month.
pub fn freshness_score(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_days = (now - published_at).num_days();
    if age_days < 3 {
        10.0
    } else if age_days < 7 {
        5.0
    } else if age_days < 30 {
        2.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::ListingLocation;
    use crate::query::category::Category;
    use chrono::Duration;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn listing(title: &str, description: &str) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            category: Category::Inmuebles,
            location: ListingLocation::Text("Wanchaq, Cusco".to_string()),
            published_at: Utc::now() - Duration::days(60),
            is_active: false,
            is_historical: false,
        }
    }

    fn intent(raw: &[&str], expanded: &[&str]) -> QueryIntent {
        let raw_terms: Vec<String> = raw.iter().map(|t| t.to_string()).collect();
        let mut expanded_terms: BTreeSet<String> =
            expanded.iter().map(|t| t.to_string()).collect();
        expanded_terms.extend(raw_terms.iter().cloned());
        QueryIntent {
            raw_terms,
            expanded_terms,
            ..QueryIntent::empty()
        }
    }

    #[test]
    fn test_title_match_beats_description_match() {
        let now = Utc::now();
        let in_title = listing("alquilo departamento", "centrico");
        let in_description = listing("alquilo", "departamento centrico");
        let intent = intent(&["departamento"], &[]);

        let title_score = score_listing(&in_title, &intent, now);
        let description_score = score_listing(&in_description, &intent, now);
        assert!(title_score > description_score);
        assert_eq!(title_score, TITLE_TERM_SCORE);
        assert_eq!(description_score, DESCRIPTION_TERM_SCORE);
    }

    #[test]
    fn test_more_title_matches_never_score_less() {
        let now = Utc::now();
        let one = listing("departamento", "bonito");
        let two = listing("departamento amoblado", "bonito");
        let intent = intent(&["departamento", "amoblado"], &[]);

        assert!(score_listing(&two, &intent, now) >= score_listing(&one, &intent, now));
    }

    #[test]
    fn test_synonym_scores_less_than_raw_term() {
        let now = Utc::now();
        let subject = listing("alquilo depa", "amplio");
        let raw = intent(&["depa"], &[]);
        let synonym = intent(&["departamento"], &["depa"]);

        assert!(score_listing(&subject, &raw, now) > score_listing(&subject, &synonym, now));
        assert_eq!(score_listing(&subject, &synonym, now), SYNONYM_TERM_SCORE);
    }

    #[test]
    fn test_category_and_location_bonuses() {
        let now = Utc::now();
        let subject = listing("cuarto amplio", "");
        let mut with_category = intent(&[], &[]);
        with_category.primary_category = Some(Category::Inmuebles);
        assert_eq!(score_listing(&subject, &with_category, now), CATEGORY_MATCH_SCORE);

        let mut with_location = intent(&[], &[]);
        with_location.location = Some(crate::geo::ResolvedPlace {
            name: "Wanchaq".to_string(),
            region: "Cusco".to_string(),
            coordinates: crate::geo::Coordinates { lat: -13.53, lng: -71.96 },
            explicit: true,
        });
        assert_eq!(score_listing(&subject, &with_location, now), LOCATION_MATCH_SCORE);
    }

    #[test]
    fn test_historical_never_outranks_identical_active() {
        let now = Utc::now();
        let mut active = listing("departamento wanchaq", "amplio");
        active.is_active = true;
        let mut historical = active.clone();
        historical.is_active = false;
        historical.is_historical = true;

        let intent = intent(&["departamento"], &[]);
        assert!(
            score_listing(&active, &intent, now) > score_listing(&historical, &intent, now)
        );
    }

    #[test]
    fn test_freshness_tiers() {
        let now = Utc::now();
        assert_eq!(freshness_score(now - Duration::days(1), now), 10.0);
        assert_eq!(freshness_score(now - Duration::days(5), now), 5.0);
        assert_eq!(freshness_score(now - Duration::days(20), now), 2.0);
        assert_eq!(freshness_score(now - Duration::days(90), now), 0.0);
    }

    #[test]
    fn test_accent_insensitive_matching() {
        let now = Utc::now();
        let subject = listing("Habitación en San Jerónimo", "");
        let intent = intent(&["habitacion"], &[]);
        assert_eq!(score_listing(&subject, &intent, now), TITLE_TERM_SCORE);
    }
}
