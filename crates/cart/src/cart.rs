//! Cart store.

use catalog::Product;
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::CartError;
use crate::item::CartItem;

/// The user's in-progress collection of intended purchases.
///
/// Lines keep the order in which products were first added. There is never
/// more than one line per product identifier.
///
/// Not deserializable: carts are only built through their mutators.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

/// Immutable copy of the cart's contents and total at one point in time.
///
/// Checkout keeps one of these from the moment a payment method is tokenized
/// and compares it against the live cart before charging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub total: Money,
}

impl CartSnapshot {
    /// Returns true if the snapshot has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// Query methods
impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the line for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// Returns the number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of units across all lines.
    ///
    /// Widened to `u64`: each line may hold up to `u32::MAX` units.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Returns the sum of price * quantity over all lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Copies the current contents and total.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total(),
        }
    }
}

// Mutations
impl Cart {
    /// Adds `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity is incremented,
    /// otherwise a new line is appended.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { quantity });
        }

        let product_id = product.id;
        if let Some(existing) = self.line_mut(product_id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            tracing::debug!(%product_id, quantity = existing.quantity, "cart line incremented");
        } else {
            self.items.push(CartItem::new(product, quantity));
            tracing::debug!(%product_id, quantity, "cart line added");
        }

        metrics::counter!("cart_items_added_total").increment(u64::from(quantity));
        Ok(())
    }

    /// Removes a product's line. Does nothing if the product is not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != product_id);
        if self.items.len() != before {
            tracing::debug!(%product_id, "cart line removed");
            metrics::counter!("cart_items_removed_total").increment(1);
        }
    }

    /// Sets a line's quantity, clamped to a minimum of 1.
    ///
    /// Never removes the line. Returns false if the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: i64) -> bool {
        let clamped = u32::try_from(new_quantity.max(1)).unwrap_or(u32::MAX);
        match self.line_mut(product_id) {
            Some(item) => {
                item.quantity = clamped;
                tracing::debug!(%product_id, quantity = clamped, "cart line quantity set");
                true
            }
            None => false,
        }
    }

    /// Adds one unit to an existing line.
    pub fn increment(&mut self, product_id: ProductId) -> bool {
        match self.get(product_id) {
            Some(item) => {
                let next = i64::from(item.quantity) + 1;
                self.update_quantity(product_id, next)
            }
            None => false,
        }
    }

    /// Removes one unit from an existing line, stopping at 1.
    pub fn decrement(&mut self, product_id: ProductId) -> bool {
        match self.get(product_id) {
            Some(item) => {
                let next = i64::from(item.quantity) - 1;
                self.update_quantity(product_id, next)
            }
            None => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        tracing::debug!("cart cleared");
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
    }
}
