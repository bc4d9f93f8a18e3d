//! Order model as shown on the order history page.

use chrono::NaiveDate;
use checkout::OrderConfirmation;
use common::{Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};

/// Fulfilment status of a placed order.
///
/// ```text
/// Pending ──► Processing ──► Shipped ──► Delivered
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A product line of a placed order, priced at the time of purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: ProductId,
    pub title: String,
    pub quantity: u32,

    #[serde(with = "common::money::decimal")]
    pub price: Money,

    #[serde(default)]
    pub image: String,
}

impl OrderLine {
    /// Returns quantity * unit price.
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub date: NaiveDate,
    pub status: OrderStatus,

    #[serde(with = "common::money::decimal")]
    pub total: Money,
    pub items: Vec<OrderLine>,
}

impl Order {
    /// Builds the history entry for an order just placed through checkout.
    ///
    /// New orders start in `Processing`: payment has already been taken.
    pub fn from_confirmation(confirmation: &OrderConfirmation) -> Self {
        let items = confirmation
            .items
            .iter()
            .map(|item| OrderLine {
                id: item.product.id,
                title: item.product.title.clone(),
                quantity: item.quantity,
                price: item.product.price,
                image: item.product.image.clone(),
            })
            .collect();

        Self {
            id: confirmation.order_id.clone(),
            date: confirmation.placed_at.date_naive(),
            status: OrderStatus::Processing,
            total: confirmation.total,
            items,
        }
    }

    /// Returns the number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Returns the sum of line totals.
    ///
    /// Equal to `total` for every order this crate creates.
    pub fn computed_total(&self) -> Money {
        self.items.iter().map(OrderLine::line_total).sum()
    }
}
