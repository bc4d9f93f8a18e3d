//! Order history collaborator trait and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use tokio::sync::RwLock;

use crate::error::{OrderHistoryError, Result};
use crate::order::Order;

/// Demonstration orders shown before anything has been placed.
const SEED_ORDERS: &str = include_str!("../data/orders.json");

/// Read access to past orders.
#[async_trait]
pub trait OrderHistoryService: Send + Sync {
    /// Lists every order, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Fetches a single order.
    async fn get_order(&self, id: &OrderId) -> Result<Order>;
}

#[derive(Debug, Default)]
struct OrderHistoryState {
    /// Kept in insertion order; sorted on read.
    orders: Vec<Order>,
    unavailable: Option<String>,
}

/// In-memory order history for tests and the local storefront.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderHistory {
    state: Arc<RwLock<OrderHistoryState>>,
}

impl InMemoryOrderHistory {
    /// Creates an empty order history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON array of orders.
    pub fn from_json(json: &str) -> Result<Self> {
        let orders: Vec<Order> = serde_json::from_str(json)?;
        Ok(Self {
            state: Arc::new(RwLock::new(OrderHistoryState {
                orders,
                unavailable: None,
            })),
        })
    }

    /// Creates a history seeded with the demonstration orders.
    pub fn seeded() -> Result<Self> {
        Self::from_json(SEED_ORDERS)
    }

    /// Stores a newly placed order.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn record(&self, order: Order) -> Result<()> {
        let mut state = self.state.write().await;
        if state.orders.iter().any(|o| o.id == order.id) {
            return Err(OrderHistoryError::Duplicate(order.id));
        }

        tracing::info!(total = %order.total, items = order.items.len(), "order recorded");
        metrics::counter!("orders_recorded_total").increment(1);
        state.orders.push(order);
        Ok(())
    }

    /// Makes every read fail with [`OrderHistoryError::Unavailable`] until reset with `None`.
    pub async fn set_unavailable(&self, reason: Option<String>) {
        self.state.write().await.unavailable = reason;
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }
}

#[async_trait]
impl OrderHistoryService for InMemoryOrderHistory {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        if let Some(reason) = &state.unavailable {
            tracing::warn!(%reason, "order history unavailable");
            return Err(OrderHistoryError::Unavailable(reason.clone()));
        }

        // Later insertions win ties on the same date.
        let mut orders: Vec<Order> = state.orders.iter().rev().cloned().collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }

    async fn get_order(&self, id: &OrderId) -> Result<Order> {
        let state = self.state.read().await;
        if let Some(reason) = &state.unavailable {
            tracing::warn!(%reason, %id, "order history unavailable");
            return Err(OrderHistoryError::Unavailable(reason.clone()));
        }
        state
            .orders
            .iter()
            .find(|o| &o.id == id)
            .cloned()
            .ok_or_else(|| OrderHistoryError::NotFound(id.clone()))
    }
}
