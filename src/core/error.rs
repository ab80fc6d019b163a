use thiserror::Error;

use crate::geo::GazetteerError;
use crate::query::category::CategoryTableError;
use crate::search::retrieval::StoreError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Gazetteer error: {0}")]
    Gazetteer(#[from] GazetteerError),

    #[error("Category table error: {0}")]
    CategoryTable(#[from] CategoryTableError),

    #[error("Listing store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
