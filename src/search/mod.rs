pub mod engine;
pub mod ranking;
pub mod retrieval;
pub mod scoring;

pub use engine::{SearchEngine, SearchResponse};
pub use ranking::{ScoredCandidate, rank};
pub use retrieval::{ListingStore, RetrievalPlan, StoreError};
pub use scoring::score_listing;
