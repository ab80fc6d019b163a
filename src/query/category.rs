use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::info;

use crate::text::{contains_word, normalize};

/// Half weight for substring matches of inflected/compounded tokens.
const PARTIAL_MATCH_FACTOR: f64 = 0.5;

/// Tokens and keywords must be longer than this for partial matching.
const PARTIAL_MATCH_MIN_CHARS: usize = 4;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Empleos,
    Inmuebles,
    Vehiculos,
    Tecnologia,
    Hogar,
    Servicios,
    Moda,
    Otros,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordWeight {
    pub keyword: String,
    pub category: Category,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhraseBoost {
    pub phrase: String,
    pub category: Category,
    pub boost: f64,
}

#[derive(Debug, Deserialize)]
struct CategoryTableFile {
    keywords: Vec<KeywordWeight>,
    #[serde(default)]
    phrases: Vec<PhraseBoost>,
}

#[derive(Debug, Error)]
pub enum CategoryTableError {
    #[error("keyword table has no entries")]
    Empty,

    #[error("keyword '{0}' has a non-positive weight")]
    NonPositiveWeight(String),

    #[error("phrase '{0}' has a non-positive boost")]
    NonPositiveBoost(String),

    #[error("duplicate keyword '{0}'")]
    DuplicateKeyword(String),

    #[error("failed to parse category table: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub primary: Option<Category>,
    pub secondary: Option<Category>,
}

/// Weighted keyword table mapping free text to categories. The on-disk
/// order of keywords is meaningful: it is the documented tie-break for
/// equal category scores.
#[derive(Debug)]
pub struct CategoryTable {
    keywords: Vec<KeywordWeight>,
    exact: HashMap<String, usize>,
    phrases: Vec<PhraseBoost>,
    // category -> position of its first keyword, for deterministic ties
    first_seen: HashMap<Category, usize>,
}

impl CategoryTable {
    pub fn from_json(json: &str) -> Result<Self, CategoryTableError> {
        let file: CategoryTableFile = serde_json::from_str(json)?;
        Self::from_records(file.keywords, file.phrases)
    }

    pub fn from_records(
        keywords: Vec<KeywordWeight>,
        phrases: Vec<PhraseBoost>,
    ) -> Result<Self, CategoryTableError> {
        if keywords.is_empty() {
            return Err(CategoryTableError::Empty);
        }

        let mut normalized_keywords = Vec::with_capacity(keywords.len());
        let mut exact = HashMap::new();
        let mut first_seen = HashMap::new();

        for (idx, record) in keywords.into_iter().enumerate() {
            if record.weight <= 0.0 {
                return Err(CategoryTableError::NonPositiveWeight(record.keyword));
            }
            let keyword = normalize(&record.keyword);
            if exact.insert(keyword.clone(), idx).is_some() {
                return Err(CategoryTableError::DuplicateKeyword(keyword));
            }
            first_seen.entry(record.category).or_insert(idx);
            normalized_keywords.push(KeywordWeight { keyword, ..record });
        }

        let mut normalized_phrases = Vec::with_capacity(phrases.len());
        for (idx, record) in phrases.into_iter().enumerate() {
            if record.boost <= 0.0 {
                return Err(CategoryTableError::NonPositiveBoost(record.phrase));
            }
            // phrase-only categories still need a tie-break position
            first_seen
                .entry(record.category)
                .or_insert(normalized_keywords.len() + idx);
            normalized_phrases.push(PhraseBoost {
                phrase: normalize(&record.phrase),
                ..record
            });
        }

        info!(
            "Category table loaded: {} keywords, {} phrases",
            normalized_keywords.len(),
            normalized_phrases.len()
        );

        Ok(Self {
            keywords: normalized_keywords,
            exact,
            phrases: normalized_phrases,
            first_seen,
        })
    }

    /// Exact keyword lookup for an already-normalized token.
    pub fn keyword(&self, token: &str) -> Option<&KeywordWeight> {
        self.exact.get(token).map(|&idx| &self.keywords[idx])
    }

    pub fn classify(&self, text: &str) -> Classification {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Classification::default();
        }

        let mut scores: HashMap<Category, f64> = HashMap::new();

        for token in normalized.split_whitespace() {
            if let Some(keyword) = self.keyword(token) {
                *scores.entry(keyword.category).or_default() += keyword.weight;
            } else if token.chars().count() > PARTIAL_MATCH_MIN_CHARS {
                if let Some(keyword) = self.partial_match(token) {
                    *scores.entry(keyword.category).or_default() +=
                        keyword.weight * PARTIAL_MATCH_FACTOR;
                }
            }
        }

        // Fixed phrases are far more discriminative than single keywords
        for phrase in &self.phrases {
            if contains_word(&normalized, &phrase.phrase) {
                *scores.entry(phrase.category).or_default() += phrase.boost;
            }
        }

        let mut ranked: Vec<(Category, f64)> =
            scores.into_iter().filter(|(_, score)| *score > 0.0).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| self.first_seen[&a.0].cmp(&self.first_seen[&b.0]))
        });

        Classification {
            primary: ranked.first().map(|&(category, _)| category),
            secondary: ranked.get(1).map(|&(category, _)| category),
        }
    }

    // First (table order) sufficiently long keyword that contains the token
    // or is contained in it; lets inflected forms contribute.
    fn partial_match(&self, token: &str) -> Option<&KeywordWeight> {
        self.keywords.iter().find(|keyword| {
            keyword.keyword.chars().count() > PARTIAL_MATCH_MIN_CHARS
                && (token.contains(&keyword.keyword) || keyword.keyword.contains(token))
        })
    }
}
