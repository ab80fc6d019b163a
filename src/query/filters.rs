use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::fold;

lazy_static! {
    // All patterns run on folded text: lower-case, accents stripped,
    // punctuation (notably the "s/" currency marker) intact.
    static ref ROOM_COUNT: Regex = Regex::new(
        r"\b(\d{1,2})\s*(?:habitacion(?:es)?|dormitorio(?:s)?|cuarto(?:s)?|ambiente(?:s)?|hab\b)"
    )
    .unwrap();

    static ref PRICE_RANGE: Regex = Regex::new(
        r"s/\.?\s*(\d[\d.,]*)\s*(?:a|hasta|-|–)\s*(?:s/\.?\s*)?(\d[\d.,]*)"
    )
    .unwrap();

    static ref SOL_AMOUNT: Regex = Regex::new(r"s/\.?\s*(\d[\d.,]*)").unwrap();

    static ref SOLES_SUFFIX_AMOUNT: Regex = Regex::new(r"\b(\d[\d.,]*)\s*soles\b").unwrap();
}

/// Numeric constraints extracted from a query. All fields optional;
/// extraction never fails, it only leaves fields unset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ListingFilters {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub room_count: Option<u32>,
}

impl ListingFilters {
    pub fn is_empty(&self) -> bool {
        self.price_min.is_none() && self.price_max.is_none() && self.room_count.is_none()
    }
}

pub fn extract_filters(text: &str) -> ListingFilters {
    let folded = fold(text);
    let mut filters = ListingFilters {
        room_count: extract_room_count(&folded),
        ..ListingFilters::default()
    };

    // A range wins over any single amount inside it
    if let Some((low, high)) = extract_price_range(&folded) {
        filters.price_min = Some(low);
        filters.price_max = Some(high);
    } else if let Some(amount) = extract_single_amount(&folded) {
        filters.price_max = Some(amount);
    }

    filters
}

pub fn extract_room_count(folded: &str) -> Option<u32> {
    ROOM_COUNT
        .captures(folded)
        .and_then(|captures| captures[1].parse().ok())
}

pub fn extract_price_range(folded: &str) -> Option<(f64, f64)> {
    let captures = PRICE_RANGE.captures(folded)?;
    let low = parse_amount(&captures[1])?;
    let high = parse_amount(&captures[2])?;
    if low <= high {
        Some((low, high))
    } else {
        Some((high, low))
    }
}

pub fn extract_single_amount(folded: &str) -> Option<f64> {
    SOL_AMOUNT
        .captures(folded)
        .or_else(|| SOLES_SUFFIX_AMOUNT.captures(folded))
        .and_then(|captures| parse_amount(&captures[1]))
}

// Amounts use "." and "," as thousands separators in listings ("1,200")
fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace([',', '.'], "").parse().ok()
}
