//! # Catalog Errors
//!
//! Error types for the dataset provider. A missing record is not an error:
//! lookups return `Option`.

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The dataset cannot be loaded or listed
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),
}

impl CatalogError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        CatalogError::DataUnavailable(reason.into())
    }
}
