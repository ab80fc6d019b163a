use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::geo::Gazetteer;
use crate::query::category::CategoryTable;
use crate::query::synonyms::SynonymTable;
use crate::text::normalize;

const GAZETTEER_FILE: &str = "gazetteer.json";
const CATEGORIES_FILE: &str = "categories.json";
const SYNONYMS_FILE: &str = "synonyms.json";
const STOP_WORDS_FILE: &str = "stop_words.json";

/// Immutable reference data backing the whole pipeline. Loaded once at
/// startup, shared behind an `Arc`, never mutated.
#[derive(Debug)]
pub struct ReferenceData {
    pub gazetteer: Arc<Gazetteer>,
    pub categories: CategoryTable,
    pub synonyms: SynonymTable,
    pub stop_words: HashSet<String>,
}

impl ReferenceData {
    /// Data files shipped with the crate. Still plain JSON: deployments
    /// that need different tables point `data_dir` at their own copies.
    pub fn builtin() -> Result<Self> {
        Self::from_sources(
            include_str!("../../data/gazetteer.json"),
            include_str!("../../data/categories.json"),
            include_str!("../../data/synonyms.json"),
            include_str!("../../data/stop_words.json"),
        )
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let read = |name: &str| -> Result<String> {
            std::fs::read_to_string(dir.join(name)).map_err(|e| {
                EngineError::ReferenceData(format!("{}: {e}", dir.join(name).display()))
            })
        };

        let data = Self::from_sources(
            &read(GAZETTEER_FILE)?,
            &read(CATEGORIES_FILE)?,
            &read(SYNONYMS_FILE)?,
            &read(STOP_WORDS_FILE)?,
        )?;
        info!("Reference data loaded from {}", dir.display());
        Ok(data)
    }

    /// Resolve per configuration: external directory if set, otherwise
    /// the shipped defaults.
    pub fn load(config: &EngineConfig) -> Result<Self> {
        match &config.data_dir {
            Some(dir) => Self::load_from_dir(dir),
            None => Self::builtin(),
        }
    }

    fn from_sources(
        gazetteer: &str,
        categories: &str,
        synonyms: &str,
        stop_words: &str,
    ) -> Result<Self> {
        let gazetteer = Gazetteer::from_json(gazetteer)?;
        let categories = CategoryTable::from_json(categories)?;
        let synonyms = SynonymTable::from_json(synonyms)
            .map_err(|e| EngineError::ReferenceData(format!("synonyms: {e}")))?;
        let raw_stop_words: Vec<String> = serde_json::from_str(stop_words)
            .map_err(|e| EngineError::ReferenceData(format!("stop words: {e}")))?;
        let stop_words = raw_stop_words.iter().map(|w| normalize(w)).collect();

        Ok(Self {
            gazetteer: Arc::new(gazetteer),
            categories,
            synonyms,
            stop_words,
        })
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}
