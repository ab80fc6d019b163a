use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::geo::ResolvedPlace;
use crate::query::category::Category;
use crate::query::filters::ListingFilters;

/// Structured representation of a free-text search query. Built once per
/// request by [`QueryAnalyzer`](crate::query::QueryAnalyzer), immutable
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryIntent {
    /// Search terms in order of appearance, stop words and generic
    /// category words removed.
    pub raw_terms: Vec<String>,
    /// Superset of `raw_terms` after synonym expansion.
    pub expanded_terms: BTreeSet<String>,
    pub primary_category: Option<Category>,
    pub secondary_category: Option<Category>,
    /// Canonical place name; the configured home region when the text
    /// names no place.
    pub location: Option<ResolvedPlace>,
    pub specific_address: Option<String>,
    pub nearby_references: Vec<String>,
    pub filters: ListingFilters,
    pub confidence: f64,
}

impl QueryIntent {
    /// Intent for unusable input (empty or punctuation-only text).
    pub fn empty() -> Self {
        Self {
            raw_terms: Vec::new(),
            expanded_terms: BTreeSet::new(),
            primary_category: None,
            secondary_category: None,
            location: None,
            specific_address: None,
            nearby_references: Vec::new(),
            filters: ListingFilters::default(),
            confidence: 0.0,
        }
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().map(|place| place.name.as_str())
    }
}
