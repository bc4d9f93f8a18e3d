//! Catalog error types.

use common::ProductId;
use thiserror::Error;

/// Errors surfaced by the catalog collaborator.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product exists with the requested identifier.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The catalog could not be reached.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The catalog returned data that could not be parsed.
    #[error("Malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
