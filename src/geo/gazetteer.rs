use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::text::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazetteerEntry {
    pub canonical_name: String,
    #[serde(default)]
    pub variants: Vec<String>,
    pub region: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub landmarks: Vec<String>,
}

#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("gazetteer has no entries")]
    Empty,

    #[error("variant '{variant}' maps to both '{first}' and '{second}'")]
    VariantCollision {
        variant: String,
        first: String,
        second: String,
    },

    #[error("entry '{0}' has an empty normalized name")]
    UnusableName(String),

    #[error("default place '{0}' is not in the gazetteer")]
    UnknownDefaultPlace(String),

    #[error("failed to parse gazetteer: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static place table. Built once at load, read-only afterwards.
///
/// Every normalized spelling (canonical name included) must map to exactly
/// one entry; a collision means the data file is wrong and load fails.
#[derive(Debug)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
    // normalized spelling -> entry index, longest spelling first so that
    // multi-word districts win over places contained in them
    index: Vec<(String, usize)>,
}

impl Gazetteer {
    pub fn from_json(json: &str) -> Result<Self, GazetteerError> {
        let entries: Vec<GazetteerEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<GazetteerEntry>) -> Result<Self, GazetteerError> {
        if entries.is_empty() {
            return Err(GazetteerError::Empty);
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            let spellings =
                std::iter::once(&entry.canonical_name).chain(entry.variants.iter());
            for spelling in spellings {
                let key = normalize(spelling);
                if key.is_empty() {
                    return Err(GazetteerError::UnusableName(
                        entry.canonical_name.clone(),
                    ));
                }
                match seen.get(&key).copied() {
                    Some(other) if other != idx => {
                        return Err(GazetteerError::VariantCollision {
                            variant: key,
                            first: entries[other].canonical_name.clone(),
                            second: entry.canonical_name.clone(),
                        });
                    }
                    _ => {
                        seen.insert(key, idx);
                    }
                }
            }
        }

        let mut index: Vec<(String, usize)> = seen.into_iter().collect();
        index.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });

        info!(
            "Gazetteer loaded: {} entries, {} spellings",
            entries.len(),
            index.len()
        );

        Ok(Self { entries, index })
    }

    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    /// Exact lookup by canonical name or variant.
    pub fn get(&self, name: &str) -> Option<&GazetteerEntry> {
        let key = normalize(name);
        self.index
            .iter()
            .find(|(spelling, _)| *spelling == key)
            .map(|&(_, idx)| &self.entries[idx])
    }

    /// Longest spelling contained (whole-word) in already-normalized text.
    pub fn match_in(&self, normalized_text: &str) -> Option<&GazetteerEntry> {
        self.index
            .iter()
            .find(|(spelling, _)| crate::text::contains_word(normalized_text, spelling))
            .map(|&(_, idx)| &self.entries[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, variants: &[&str]) -> GazetteerEntry {
        GazetteerEntry {
            canonical_name: name.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
            region: "Cusco".to_string(),
            coordinates: Coordinates { lat: -13.5, lng: -71.9 },
            landmarks: vec![],
        }
    }

    #[test]
    fn test_round_trip_canonical_names() {
        let gazetteer = Gazetteer::from_entries(vec![
            entry("Cusco", &["cuzco"]),
            entry("Wanchaq", &["wanchac"]),
        ])
        .unwrap();

        for e in gazetteer.entries() {
            let found = gazetteer.get(&e.canonical_name).unwrap();
            assert_eq!(found.canonical_name, e.canonical_name);
        }
    }

    #[test]
    fn test_variant_lookup_is_accent_insensitive() {
        let gazetteer =
            Gazetteer::from_entries(vec![entry("San Jerónimo", &["san jeronimo"])]).unwrap();
        assert!(gazetteer.get("SAN JERÓNIMO").is_some());
        assert!(gazetteer.get("san jeronimo").is_some());
    }

    #[test]
    fn test_collision_is_rejected_at_load() {
        let err = Gazetteer::from_entries(vec![
            entry("Cusco", &["centro"]),
            entry("Wanchaq", &["centro"]),
        ])
        .unwrap_err();

        match err {
            GazetteerError::VariantCollision { variant, .. } => {
                assert_eq!(variant, "centro");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_spelling_within_one_entry_is_fine() {
        // canonical "Cusco" and variant "cusco" normalize identically
        let gazetteer = Gazetteer::from_entries(vec![entry("Cusco", &["cusco"])]).unwrap();
        assert!(gazetteer.get("cusco").is_some());
    }

    #[test]
    fn test_empty_gazetteer_is_rejected() {
        assert!(matches!(
            Gazetteer::from_entries(vec![]),
            Err(GazetteerError::Empty)
        ));
    }

    #[test]
    fn test_longest_spelling_wins() {
        let gazetteer = Gazetteer::from_entries(vec![
            entry("Santiago", &[]),
            entry("Santiago Alto", &[]),
        ])
        .unwrap();

        let hit = gazetteer.match_in("alquilo cuarto en santiago alto cusco").unwrap();
        assert_eq!(hit.canonical_name, "Santiago Alto");
    }
}
