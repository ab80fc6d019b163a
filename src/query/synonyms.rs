use std::collections::{BTreeSet, HashMap};

use tracing::info;

use crate::text::normalize;

#[derive(Debug, Clone)]
struct SynonymGroup {
    canonical: String,
    alternates: Vec<String>,
}

/// Fixed bidirectional synonym table. Matching any spelling of a group
/// pulls in the canonical term and every alternate.
#[derive(Debug)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
}

impl SynonymTable {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::from_map(raw))
    }

    pub fn from_map(raw: HashMap<String, Vec<String>>) -> Self {
        let mut groups: Vec<SynonymGroup> = raw
            .into_iter()
            .map(|(canonical, alternates)| SynonymGroup {
                canonical: normalize(&canonical),
                alternates: alternates.iter().map(|a| normalize(a)).collect(),
            })
            .collect();
        groups.sort_by(|a, b| a.canonical.cmp(&b.canonical));

        info!("Synonym table loaded: {} groups", groups.len());
        Self { groups }
    }

    /// Expansion is monotonic: the output always contains every input term.
    pub fn expand(&self, terms: &[String]) -> BTreeSet<String> {
        let mut expanded: BTreeSet<String> = terms.iter().cloned().collect();

        for group in &self.groups {
            let hit = terms.iter().any(|term| {
                *term == group.canonical || group.alternates.contains(term)
            });
            if hit {
                expanded.insert(group.canonical.clone());
                expanded.extend(group.alternates.iter().cloned());
            }
        }

        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SynonymTable {
        SynonymTable::from_map(HashMap::from([
            (
                "alquiler".to_string(),
                vec!["alquilar".to_string(), "renta".to_string()],
            ),
            (
                "auto".to_string(),
                vec!["carro".to_string(), "vehiculo".to_string()],
            ),
        ]))
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_canonical_term_pulls_in_alternates() {
        let expanded = table().expand(&terms(&["alquiler", "cusco"]));
        for expected in ["alquiler", "alquilar", "renta", "cusco"] {
            assert!(expanded.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_alternate_pulls_in_whole_group() {
        // "carro" is an alternate; the canonical "auto" must appear too
        let expanded = table().expand(&terms(&["carro"]));
        for expected in ["auto", "carro", "vehiculo"] {
            assert!(expanded.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_expansion_is_monotonic() {
        let inputs = [
            terms(&["alquiler"]),
            terms(&["carro", "zzz"]),
            terms(&["sin", "sinonimos"]),
            terms(&[]),
        ];
        let table = table();
        for input in inputs {
            let expanded = table.expand(&input);
            for term in &input {
                assert!(expanded.contains(term), "expansion dropped {term}");
            }
        }
    }

    #[test]
    fn test_unknown_terms_pass_through_unchanged() {
        let expanded = table().expand(&terms(&["bicicleta"]));
        assert_eq!(expanded.len(), 1);
        assert!(expanded.contains("bicicleta"));
    }
}
