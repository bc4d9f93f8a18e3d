//! HTTP storefront server with observability.
//!
//! Exposes the catalog, the cart, the checkout flow and order history as
//! JSON endpoints, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use catalog::InMemoryCatalog;
use checkout::InMemoryPaymentCollaborator;
use metrics_exporter_prometheus::PrometheusHandle;
use orders::InMemoryOrderHistory;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::ApiError;
use state::{AppState, Session};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::health::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/products", get(routes::products::list))
        .route("/products/{id}", get(routes::products::get))
        .route("/categories", get(routes::products::categories))
        .route("/cart", get(routes::cart::view).delete(routes::cart::clear))
        .route("/cart/items", post(routes::cart::add))
        .route(
            "/cart/items/{id}",
            put(routes::cart::update).delete(routes::cart::remove),
        )
        .route("/checkout", get(routes::checkout::view))
        .route("/checkout/shipping", post(routes::checkout::shipping))
        .route("/checkout/payment", post(routes::checkout::payment))
        .route("/checkout/back", post(routes::checkout::back))
        .route("/checkout/place-order", post(routes::checkout::place_order))
        .route("/checkout/reset", post(routes::checkout::reset))
        .route("/orders", get(routes::orders::list))
        .route("/orders/{id}", get(routes::orders::get))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state with seeded in-memory collaborators.
pub fn create_default_state(config: &Config) -> Result<Arc<AppState>, ApiError> {
    let catalog = InMemoryCatalog::seeded()?;
    let orders = InMemoryOrderHistory::seeded()?;
    let payment = InMemoryPaymentCollaborator::new();
    let session = Session::new(payment.clone(), config.checkout());

    Ok(Arc::new(AppState {
        catalog,
        orders,
        payment,
        session: tokio::sync::Mutex::new(session),
    }))
}
