pub mod category;
pub mod filters;
pub mod models;
pub mod processor;
pub mod synonyms;

pub use category::{Category, CategoryTable, CategoryTableError, Classification};
pub use filters::{ListingFilters, extract_filters};
pub use models::QueryIntent;
pub use processor::QueryAnalyzer;
pub use synonyms::SynonymTable;
