use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinates;
use crate::query::category::Category;

/// A classified advertisement. Owned by the listing store; the engine
/// only ever reads these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: ListingLocation,
    pub published_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_historical: bool,
}

fn default_active() -> bool {
    true
}

/// Listing location as stored: legacy records carry a free-text string,
/// newer ones a structured place. Every consumer matches both arms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingLocation {
    Text(String),
    Structured(StructuredLocation),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredLocation {
    pub region: String,
    #[serde(default)]
    pub province: Option<String>,
    pub district: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl ListingLocation {
    /// Flattened text used for location matching during scoring.
    pub fn search_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Structured(place) => {
                let mut parts = vec![place.district.clone()];
                if let Some(province) = &place.province {
                    parts.push(province.clone());
                }
                parts.push(place.region.clone());
                if let Some(address) = &place.address {
                    parts.push(address.clone());
                }
                parts.join(" ")
            }
        }
    }
}
