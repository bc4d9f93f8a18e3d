//! Cart endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use cart::{Cart, CartItem};
use catalog::CatalogService;
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: u64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct UpdateQuantityRequest {
    /// Values below 1 are clamped to 1.
    pub quantity: i64,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartLineResponse {
    #[serde(flatten)]
    pub item: CartItem,
    #[serde(with = "common::money::decimal")]
    pub line_total: Money,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub item_count: u64,
    #[serde(with = "common::money::decimal")]
    pub total: Money,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartLineResponse {
                    line_total: item.line_total(),
                    item: item.clone(),
                })
                .collect(),
            item_count: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// -- Handlers --

/// GET /cart
pub async fn view(State(state): State<Arc<AppState>>) -> Json<CartResponse> {
    let session = state.session.lock().await;
    Json(CartResponse::from(&session.cart))
}

/// POST /cart/items: add a catalog product, merging with an existing line.
#[tracing::instrument(skip(state, req), fields(product_id = req.product_id, quantity = req.quantity))]
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let product = state
        .catalog
        .get_product(ProductId::new(req.product_id))
        .await?;

    let mut session = state.session.lock().await;
    session.cart.add_item(product, req.quantity)?;
    Ok((StatusCode::CREATED, Json(CartResponse::from(&session.cart))))
}

/// PUT /cart/items/{id}: set a line's quantity. Unknown products are ignored.
#[tracing::instrument(skip(state, req))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Json<CartResponse> {
    let mut session = state.session.lock().await;
    if !session.cart.update_quantity(ProductId::new(id), req.quantity) {
        tracing::debug!(product_id = id, "update for product not in cart ignored");
    }
    Json(CartResponse::from(&session.cart))
}

/// DELETE /cart/items/{id}
#[tracing::instrument(skip(state))]
pub async fn remove(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Json<CartResponse> {
    let mut session = state.session.lock().await;
    session.cart.remove_item(ProductId::new(id));
    Json(CartResponse::from(&session.cart))
}

/// DELETE /cart
#[tracing::instrument(skip(state))]
pub async fn clear(State(state): State<Arc<AppState>>) -> Json<CartResponse> {
    let mut session = state.session.lock().await;
    session.cart.clear();
    Json(CartResponse::from(&session.cart))
}
