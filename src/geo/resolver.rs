use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::gazetteer::{Coordinates, Gazetteer, GazetteerEntry, GazetteerError};
use crate::text::normalize;

lazy_static! {
    // Extraction runs on folded text (lower-case, accents stripped,
    // punctuation intact) so commas and periods bound the captured run.
    static ref ADDRESS_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"\b(?:av|avenida|calle|jr|jiron|pasaje|prolongacion|urb|urbanizacion)\.?\s+\w+(?:\s+\w+){0,3}"
        )
        .unwrap(),
        Regex::new(r"\b(?:mz|manzana)\.?\s*\w+(?:[\s,]+(?:lt|lote)\.?\s*\w+)?").unwrap(),
        Regex::new(r"\b(?:lt|lote)\.?\s*\w+(?:[\s,]+(?:mz|manzana)\.?\s*\w+)?").unwrap(),
    ];

    static ref NEARBY_PATTERN: Regex = Regex::new(
        r"\b(?:cerca (?:de la|de el|del|de|a)|frente (?:a la|al|a)|detras (?:de la|del|de)|junto (?:a la|al|a)|al costado (?:de la|del|de)|espaldas (?:de la|del|de))\s+(\w+(?:\s+\w+){0,3})"
    )
    .unwrap();
}

/// Location attached to a query intent. `explicit` is false when the place
/// came from the configured home-region fallback instead of the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub name: String,
    pub region: String,
    pub coordinates: Coordinates,
    pub explicit: bool,
}

impl ResolvedPlace {
    fn from_entry(entry: &GazetteerEntry, explicit: bool) -> Self {
        Self {
            name: entry.canonical_name.clone(),
            region: entry.region.clone(),
            coordinates: entry.coordinates,
            explicit,
        }
    }
}

/// Resolves free text against the gazetteer. The fallback place is part of
/// the resolver's configuration, never decided per call site.
pub struct LocationResolver {
    gazetteer: Arc<Gazetteer>,
    default_place: String,
}

impl LocationResolver {
    pub fn new(gazetteer: Arc<Gazetteer>, default_place: &str) -> Result<Self, GazetteerError> {
        if gazetteer.get(default_place).is_none() {
            return Err(GazetteerError::UnknownDefaultPlace(default_place.to_string()));
        }
        Ok(Self {
            gazetteer,
            default_place: default_place.to_string(),
        })
    }

    /// First gazetteer entry whose spelling occurs whole-word in the text,
    /// longest spelling first. No fallback.
    pub fn match_place(&self, text: &str) -> Option<&GazetteerEntry> {
        let normalized = normalize(text);
        self.gazetteer.match_in(&normalized)
    }

    /// Like [`match_place`](Self::match_place) but falls back to the
    /// configured home region, since nearly all listings live there.
    pub fn resolve(&self, text: &str) -> ResolvedPlace {
        match self.match_place(text) {
            Some(entry) => {
                debug!("resolved location '{}'", entry.canonical_name);
                ResolvedPlace::from_entry(entry, true)
            }
            None => {
                let entry = self
                    .gazetteer
                    .get(&self.default_place)
                    .expect("default place validated in constructor");
                ResolvedPlace::from_entry(entry, false)
            }
        }
    }

    /// Longest address-like fragment (street prefixes, lot/block notation).
    pub fn extract_specific_address(&self, text: &str) -> Option<String> {
        let folded = crate::text::fold(text);
        ADDRESS_PATTERNS
            .iter()
            .flat_map(|pattern| pattern.find_iter(&folded))
            .map(|m| m.as_str().trim().to_string())
            .max_by_key(|s| s.chars().count())
    }

    /// "cerca de / frente a / detras de <reference>" fragments, in order of
    /// appearance.
    pub fn extract_nearby_references(&self, text: &str) -> Vec<String> {
        let folded = crate::text::fold(text);
        NEARBY_PATTERN
            .captures_iter(&folded)
            .map(|captures| captures[1].trim().to_string())
            .collect()
    }
}
