//! Order history endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::OrderId;
use orders::{Order, OrderHistoryService};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /orders: every order, newest first.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.orders.list_orders().await?;
    Ok(Json(orders))
}

/// GET /orders/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::BadRequest("Order ID is required".to_string()));
    }
    let order = state.orders.get_order(&OrderId::new(id)).await?;
    Ok(Json(order))
}
