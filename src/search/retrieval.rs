use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::core::config::EngineConfig;
use crate::listings::Listing;
use crate::query::category::Category;
use crate::query::models::QueryIntent;

/// Failure reported by the listing store. Retrieval is the only fallible
/// stage of the pipeline; everything upstream degrades instead.
#[derive(Debug, Error)]
#[error("listing store error: {0}")]
pub struct StoreError(pub String);

/// Storage collaborator. Implemented outside this crate; the engine only
/// shapes the queries it sends through here.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Listings whose title or description matches ANY of the terms.
    async fn find_matching_any(
        &self,
        terms: &[String],
        category_hint: Option<Category>,
        cap: usize,
    ) -> Result<Vec<Listing>, StoreError>;

    async fn find_by_category(
        &self,
        category: Category,
        cap: usize,
    ) -> Result<Vec<Listing>, StoreError>;

    /// Most recent listings, unfiltered.
    async fn find_recent(&self, cap: usize) -> Result<Vec<Listing>, StoreError>;
}

/// Broad-recall query shape derived from an intent. Requiring all terms
/// would destroy recall for multi-concept queries, so term queries are
/// any-of; the cap over-fetches so the ranker has material to work with.
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalPlan {
    AnyTerms {
        terms: Vec<String>,
        category_hint: Option<Category>,
        cap: usize,
    },
    ByCategory {
        category: Category,
        cap: usize,
    },
    Recent {
        cap: usize,
    },
}

impl RetrievalPlan {
    pub fn for_intent(intent: &QueryIntent, limit: usize, config: &EngineConfig) -> Self {
        let cap = limit.max(1) * config.overfetch_factor.max(1);

        if !intent.expanded_terms.is_empty() {
            // raw terms first, synonyms fill whatever room is left
            let mut terms = intent.raw_terms.clone();
            for term in &intent.expanded_terms {
                if terms.len() >= config.max_query_terms {
                    break;
                }
                if !terms.contains(term) {
                    terms.push(term.clone());
                }
            }
            terms.truncate(config.max_query_terms);

            return Self::AnyTerms {
                terms,
                category_hint: intent.primary_category,
                cap,
            };
        }

        if let Some(category) = intent.primary_category {
            return Self::ByCategory { category, cap };
        }

        Self::Recent { cap }
    }
}

/// One store round-trip for the given plan. Cancellation is the caller's:
/// dropping the returned future abandons the request.
pub async fn fetch_candidates(
    store: &dyn ListingStore,
    plan: &RetrievalPlan,
) -> Result<Vec<Listing>, StoreError> {
    debug!("Fetching candidates: {:?}", plan);
    match plan {
        RetrievalPlan::AnyTerms {
            terms,
            category_hint,
            cap,
        } => store.find_matching_any(terms, *category_hint, *cap).await,
        RetrievalPlan::ByCategory { category, cap } => {
            store.find_by_category(*category, *cap).await
        }
        RetrievalPlan::Recent { cap } => store.find_recent(*cap).await,
    }
}
