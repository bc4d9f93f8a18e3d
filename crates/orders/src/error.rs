//! Order history error types.

use common::OrderId;
use thiserror::Error;

/// Errors surfaced by the order history collaborator.
#[derive(Debug, Error)]
pub enum OrderHistoryError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Order {0} already exists")]
    Duplicate(OrderId),

    #[error("Order history unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed order data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for order history operations.
pub type Result<T> = std::result::Result<T, OrderHistoryError>;
