//! Cart line item.

use catalog::Product;
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A product in the cart together with the quantity wanted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,

    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    pub(crate) fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Returns the product identifier this line is keyed by.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Returns the unit price.
    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// Returns the total price for this line (quantity * unit price).
    pub fn line_total(&self) -> Money {
        self.product.price.multiply(self.quantity)
    }
}
