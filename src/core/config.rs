use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

fn default_place() -> String {
    "Cusco".to_string()
}

fn base_confidence() -> f64 {
    0.3
}

fn confidence_step() -> f64 {
    0.2
}

fn generic_weight_ceiling() -> f64 {
    5.0
}

fn min_score() -> f64 {
    20.0
}

fn overfetch_factor() -> usize {
    4
}

fn max_query_terms() -> usize {
    8
}

fn default_limit() -> usize {
    20
}

/// Engine configuration. Every field has a sensible default; overrides
/// come from an optional config file layered under `ADISO_`-prefixed
/// environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory with the reference data files. `None` uses the data
    /// shipped with the crate.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Canonical name of the home-region fallback place. Must exist in
    /// the gazetteer.
    #[serde(default = "default_place")]
    pub default_place: String,

    #[serde(default = "base_confidence")]
    pub base_confidence: f64,

    /// Added once per signal: category found, explicit location, terms.
    #[serde(default = "confidence_step")]
    pub confidence_step: f64,

    /// Keywords of the primary category below this weight are treated as
    /// generic and dropped from the search terms.
    #[serde(default = "generic_weight_ceiling")]
    pub generic_weight_ceiling: f64,

    /// Candidates must exceed this score to appear in results.
    #[serde(default = "min_score")]
    pub min_score: f64,

    /// Retrieval cap = requested limit * this factor.
    #[serde(default = "overfetch_factor")]
    pub overfetch_factor: usize,

    /// Upper bound on terms sent to the listing store.
    #[serde(default = "max_query_terms")]
    pub max_query_terms: usize,

    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl EngineConfig {
    /// Environment-only configuration (`ADISO_DEFAULT_PLACE`, ...).
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        builder
            .add_source(config::Environment::with_prefix("ADISO"))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| EngineError::Config(e.to_string()))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_place: default_place(),
            base_confidence: base_confidence(),
            confidence_step: confidence_step(),
            generic_weight_ceiling: generic_weight_ceiling(),
            min_score: min_score(),
            overfetch_factor: overfetch_factor(),
            max_query_terms: max_query_terms(),
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_place, "Cusco");
        assert!(config.data_dir.is_none());
        assert_eq!(config.overfetch_factor, 4);
        assert!((config.base_confidence - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_without_sources_matches_defaults() {
        let loaded = EngineConfig::load(None).unwrap();
        let defaults = EngineConfig::default();
        assert_eq!(loaded.default_place, defaults.default_place);
        assert_eq!(loaded.max_query_terms, defaults.max_query_terms);
        assert_eq!(loaded.min_score, defaults.min_score);
    }
}
