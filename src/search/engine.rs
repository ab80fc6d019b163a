use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::listings::Listing;
use crate::query::models::QueryIntent;
use crate::query::processor::QueryAnalyzer;
use crate::reference::ReferenceData;
use crate::search::ranking::rank;
use crate::search::retrieval::{ListingStore, RetrievalPlan, fetch_candidates};
use crate::text::truncate_for_log;

/// What the assistant shows the user. A store failure degrades to an
/// empty result list with `degraded` set; it never surfaces as a panic.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub intent: QueryIntent,
    pub listings: Vec<Listing>,
    pub degraded: Option<String>,
}

/// Facade over the whole pipeline: analyze, retrieve, rank.
pub struct SearchEngine {
    analyzer: QueryAnalyzer,
    store: Arc<dyn ListingStore>,
    config: EngineConfig,
}

impl SearchEngine {
    pub fn new(
        reference: Arc<ReferenceData>,
        store: Arc<dyn ListingStore>,
        config: EngineConfig,
    ) -> Result<Self> {
        let analyzer = QueryAnalyzer::new(reference, &config)?;
        Ok(Self {
            analyzer,
            store,
            config,
        })
    }

    pub fn analyze(&self, message: &str) -> QueryIntent {
        self.analyzer.analyze(message)
    }

    pub fn resolve_location(&self, text: &str) -> crate::geo::ResolvedPlace {
        self.analyzer.resolve_location(text)
    }

    /// Retrieve a broad candidate set for the intent and rank it down to
    /// at most `limit` listings. The store round-trip is the only await
    /// point; dropping the future cancels the request.
    pub async fn resolve_ranked_results(
        &self,
        intent: &QueryIntent,
        limit: usize,
    ) -> Result<Vec<Listing>> {
        let plan = RetrievalPlan::for_intent(intent, limit, &self.config);
        let candidates = fetch_candidates(self.store.as_ref(), &plan).await?;

        let ranked = rank(candidates, intent, limit, self.config.min_score, Utc::now());
        info!("Search resolved: {} listings", ranked.len());
        Ok(ranked)
    }

    pub async fn search(&self, message: &str, limit: usize) -> SearchResponse {
        let limit = if limit == 0 { self.config.default_limit } else { limit };
        let intent = self.analyze(message);

        match self.resolve_ranked_results(&intent, limit).await {
            Ok(listings) => SearchResponse {
                intent,
                listings,
                degraded: None,
            },
            Err(error) => {
                warn!(
                    "Search degraded for '{}': {}",
                    truncate_for_log(message, 80),
                    error
                );
                SearchResponse {
                    intent,
                    listings: Vec::new(),
                    degraded: Some(error.to_string()),
                }
            }
        }
    }
}
