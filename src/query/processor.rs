use std::sync::Arc;

use tracing::{debug, info};

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::geo::LocationResolver;
use crate::query::category::Category;
use crate::query::filters::extract_filters;
use crate::query::models::QueryIntent;
use crate::reference::ReferenceData;
use crate::text::{normalize, truncate_for_log};

/// Turns a free-text message into a [`QueryIntent`]. Pure over the shared
/// reference data; one instance serves any number of concurrent requests.
pub struct QueryAnalyzer {
    reference: Arc<ReferenceData>,
    resolver: LocationResolver,
    base_confidence: f64,
    confidence_step: f64,
    generic_weight_ceiling: f64,
}

impl QueryAnalyzer {
    pub fn new(reference: Arc<ReferenceData>, config: &EngineConfig) -> Result<Self> {
        let resolver =
            LocationResolver::new(reference.gazetteer.clone(), &config.default_place)?;
        Ok(Self {
            reference,
            resolver,
            base_confidence: config.base_confidence,
            confidence_step: config.confidence_step,
            generic_weight_ceiling: config.generic_weight_ceiling,
        })
    }

    /// Gazetteer resolution with the configured home-region fallback.
    pub fn resolve_location(&self, text: &str) -> crate::geo::ResolvedPlace {
        self.resolver.resolve(text)
    }

    pub fn analyze(&self, message: &str) -> QueryIntent {
        debug!("Analyzing query: {}", truncate_for_log(message, 120));

        let normalized = normalize(message);
        if normalized.is_empty() {
            return QueryIntent::empty();
        }

        let classification = self.reference.categories.classify(&normalized);
        let raw_terms = self.extract_terms(&normalized, classification.primary);
        let expanded_terms = self.reference.synonyms.expand(&raw_terms);
        let location = self.resolver.resolve(&normalized);
        let specific_address = self.resolver.extract_specific_address(message);
        let nearby_references = self.resolver.extract_nearby_references(message);
        let filters = extract_filters(message);

        let confidence = self.confidence(
            classification.primary.is_some(),
            location.explicit,
            !raw_terms.is_empty(),
        );

        info!(
            "Query analyzed: category={:?} location={} terms={} confidence={:.2}",
            classification.primary,
            location.name,
            raw_terms.len(),
            confidence
        );

        QueryIntent {
            raw_terms,
            expanded_terms,
            primary_category: classification.primary,
            secondary_category: classification.secondary,
            location: Some(location),
            specific_address,
            nearby_references,
            filters,
            confidence,
        }
    }

    // Tokens that survive: not a stop word, not purely numeric, at least
    // two characters, and not a generic keyword of the primary category.
    // Strong category keywords stay: a job title that selected "empleos"
    // is still the best search term the query has.
    fn extract_terms(&self, normalized: &str, primary: Option<Category>) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();

        for token in normalized.split_whitespace() {
            if token.chars().count() < 2 {
                continue;
            }
            if token.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if self.reference.is_stop_word(token) {
                continue;
            }
            if let (Some(category), Some(keyword)) =
                (primary, self.reference.categories.keyword(token))
            {
                if keyword.category == category && keyword.weight < self.generic_weight_ceiling {
                    continue;
                }
            }
            if !terms.iter().any(|existing| existing == token) {
                terms.push(token.to_string());
            }
        }

        terms
    }

    fn confidence(&self, has_category: bool, has_location: bool, has_terms: bool) -> f64 {
        let mut confidence = self.base_confidence;
        for signal in [has_category, has_location, has_terms] {
            if signal {
                confidence += self.confidence_step;
            }
        }
        confidence.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> QueryAnalyzer {
        let reference = Arc::new(ReferenceData::builtin().unwrap());
        QueryAnalyzer::new(reference, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_job_query_in_wanchaq() {
        let intent = analyzer().analyze("busco trabajo de cocinero en wanchaq");

        assert_eq!(intent.primary_category, Some(Category::Empleos));
        assert_eq!(intent.location_name(), Some("Wanchaq"));
        // "cocinero" classified the query AND stays as a search term
        assert!(intent.raw_terms.contains(&"cocinero".to_string()));
        // "trabajo" is a generic empleos keyword, dropped from terms
        assert!(!intent.raw_terms.contains(&"trabajo".to_string()));
        assert!(intent.confidence >= 0.8);
    }

    #[test]
    fn test_rental_query_with_price_range() {
        let intent = analyzer().analyze("departamento en alquiler cusco s/ 800 a 1200");

        assert_eq!(intent.primary_category, Some(Category::Inmuebles));
        assert_eq!(intent.location_name(), Some("Cusco"));
        assert_eq!(intent.filters.price_min, Some(800.0));
        assert_eq!(intent.filters.price_max, Some(1200.0));
    }

    #[test]
    fn test_expanded_terms_superset_of_raw_terms() {
        let intent = analyzer().analyze("alquiler de departamento en san sebastian");
        for term in &intent.raw_terms {
            assert!(intent.expanded_terms.contains(term));
        }
        // synonym expansion widened the set
        assert!(intent.expanded_terms.contains("depa"));
    }

    #[test]
    fn test_empty_input_degrades_to_empty_intent() {
        for message in ["", "   ", "¡¿?!"] {
            let intent = analyzer().analyze(message);
            assert!(intent.raw_terms.is_empty());
            assert!(intent.primary_category.is_none());
            assert!(intent.location.is_none());
            assert_eq!(intent.confidence, 0.0);
        }
    }

    #[test]
    fn test_unlocated_query_falls_back_to_home_region() {
        let intent = analyzer().analyze("vendo laptop seminueva");
        let location = intent.location.unwrap();
        assert_eq!(location.name, "Cusco");
        assert!(!location.explicit);
    }

    #[test]
    fn test_fallback_location_earns_no_confidence() {
        let analyzer = analyzer();
        let located = analyzer.analyze("vendo laptop en wanchaq");
        let unlocated = analyzer.analyze("vendo laptop seminueva");
        assert!(located.confidence > unlocated.confidence);
    }

    #[test]
    fn test_terms_are_deduplicated_in_order() {
        let intent = analyzer().analyze("cocinero cocinero parrillero");
        assert_eq!(intent.raw_terms, vec!["cocinero", "parrillero"]);
    }

    #[test]
    fn test_numeric_and_short_tokens_dropped() {
        let intent = analyzer().analyze("departamento 800 x cusco");
        assert!(!intent.raw_terms.iter().any(|t| t == "800" || t == "x"));
    }
}
