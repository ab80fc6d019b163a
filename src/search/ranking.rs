use chrono::{DateTime, Utc};
use tracing::debug;

use crate::listings::Listing;
use crate::query::models::QueryIntent;
use crate::search::scoring::score_listing;

/// One candidate with its relevance score. Lives only for the duration of
/// a ranking pass.
#[derive(Debug)]
pub struct ScoredCandidate {
    pub listing: Listing,
    pub score: f64,
}

/// Score, threshold, sort, truncate. Candidates scoring at or below
/// `min_score` are noise (they matched only incidental common words) and
/// are dropped even when fewer than `limit` results remain.
pub fn rank(
    candidates: Vec<Listing>,
    intent: &QueryIntent,
    limit: usize,
    min_score: f64,
    now: DateTime<Utc>,
) -> Vec<Listing> {
    let total = candidates.len();

    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|listing| ScoredCandidate {
            score: score_listing(&listing, intent, now),
            listing,
        })
        .collect();

    // Equal scores: newest listing first
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.listing.published_at.cmp(&a.listing.published_at))
    });

    let ranked: Vec<Listing> = scored
        .into_iter()
        .filter(|candidate| candidate.score > min_score)
        .take(limit)
        .map(|candidate| candidate.listing)
        .collect();

    debug!("Ranked {} of {} candidates above threshold", ranked.len(), total);
    ranked
}
