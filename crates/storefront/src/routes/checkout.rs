//! Checkout endpoints.
//!
//! Each handler drives one transition of the session's checkout flow. The
//! session lock is held across payment calls so that cart edits cannot
//! interleave with an order being placed.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use checkout::{CardDetails, CheckoutStage, OrderConfirmation, ShippingInfo};
use orders::Order;
use serde::Serialize;

use super::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{AppState, Session};

#[derive(Serialize)]
pub struct ReviewResponse {
    pub items: Vec<cart::CartItem>,
    #[serde(with = "common::money::decimal")]
    pub total: common::Money,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub stage: CheckoutStage,
    /// 1-based position in the visible stepper; absent once confirmed.
    pub step: Option<u8>,
    pub can_go_back: bool,
    pub shipping: Option<ShippingInfo>,
    pub card_valid: bool,
    pub review: Option<ReviewResponse>,
    pub confirmation: Option<OrderConfirmation>,
    pub cart: CartResponse,
}

impl From<&Session> for CheckoutResponse {
    fn from(session: &Session) -> Self {
        let checkout = session.checkout.session();
        Self {
            stage: checkout.stage(),
            step: checkout.stage().step_number(),
            can_go_back: checkout.stage().can_go_back(),
            shipping: checkout.shipping().cloned(),
            card_valid: checkout.is_card_valid(),
            review: checkout.review().map(|snapshot| ReviewResponse {
                items: snapshot.items.clone(),
                total: snapshot.total,
            }),
            confirmation: checkout.confirmation().cloned(),
            cart: CartResponse::from(&session.cart),
        }
    }
}

/// GET /checkout
pub async fn view(State(state): State<Arc<AppState>>) -> Json<CheckoutResponse> {
    let session = state.session.lock().await;
    Json(CheckoutResponse::from(&*session))
}

/// POST /checkout/shipping
#[tracing::instrument(skip(state, info))]
pub async fn shipping(
    State(state): State<Arc<AppState>>,
    Json(info): Json<ShippingInfo>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let mut session = state.session.lock().await;
    session.checkout.submit_shipping(info)?;
    Ok(Json(CheckoutResponse::from(&*session)))
}

/// POST /checkout/payment: tokenize the card. Nothing is charged.
#[tracing::instrument(skip(state, card))]
pub async fn payment(
    State(state): State<Arc<AppState>>,
    Json(card): Json<CardDetails>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let mut guard = state.session.lock().await;
    let session = &mut *guard;
    session
        .checkout
        .submit_payment(&card, &session.cart)
        .await?;
    Ok(Json(CheckoutResponse::from(&*session)))
}

/// POST /checkout/back
#[tracing::instrument(skip(state))]
pub async fn back(State(state): State<Arc<AppState>>) -> Result<Json<CheckoutResponse>, ApiError> {
    let mut session = state.session.lock().await;
    session.checkout.back()?;
    Ok(Json(CheckoutResponse::from(&*session)))
}

/// POST /checkout/place-order: charge the payment method and record the order.
#[tracing::instrument(skip(state))]
pub async fn place_order(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<OrderConfirmation>), ApiError> {
    let mut guard = state.session.lock().await;
    let session = &mut *guard;
    let confirmation = session.checkout.place_order(&mut session.cart).await?;

    // The charge has gone through; a history failure must not fail the request.
    if let Err(e) = state
        .orders
        .record(Order::from_confirmation(&confirmation))
        .await
    {
        tracing::error!(order_id = %confirmation.order_id, error = %e, "failed to record order");
        metrics::counter!("storefront_order_record_failures_total").increment(1);
    }

    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// POST /checkout/reset: abandon the session and start again at Shipping.
#[tracing::instrument(skip(state))]
pub async fn reset(State(state): State<Arc<AppState>>) -> Json<CheckoutResponse> {
    let mut session = state.session.lock().await;
    session.checkout.reset();
    Json(CheckoutResponse::from(&*session))
}
