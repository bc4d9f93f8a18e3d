//! Shopping cart store.
//!
//! The cart is a plain value owned by the caller and passed by reference to
//! whatever needs it (the cart page, the checkout flow). It holds at most one
//! line per product and recomputes its total on every read.

mod cart;
mod item;

pub use cart::{Cart, CartSnapshot};
pub use item::CartItem;

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity added to the cart must be at least 1.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },
}
