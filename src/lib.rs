pub mod core;
pub mod geo;
pub mod listings;
pub mod query;
pub mod reference;
pub mod search;
pub mod text;

pub use crate::core::config::EngineConfig;
pub use crate::core::error::{EngineError, Result};
pub use crate::geo::{
    Coordinates, Gazetteer, GazetteerEntry, GazetteerError, LocationResolver, ResolvedPlace,
};
pub use crate::listings::{Listing, ListingLocation, StructuredLocation};
pub use crate::query::{
    Category, CategoryTable, CategoryTableError, Classification, ListingFilters, QueryAnalyzer,
    QueryIntent, SynonymTable, extract_filters,
};
pub use crate::reference::ReferenceData;
pub use crate::search::{
    ListingStore, RetrievalPlan, ScoredCandidate, SearchEngine, SearchResponse, StoreError,
    rank, score_listing,
};

pub const DEFAULT_RESULT_LIMIT: usize = 20;

pub const DEFAULT_HOME_PLACE: &str = "Cusco";
