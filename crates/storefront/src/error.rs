//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cart::CartError;
use catalog::CatalogError;
use checkout::{CheckoutError, PaymentError};
use orders::OrderHistoryError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Catalog collaborator error.
    Catalog(CatalogError),
    /// Cart operation rejected.
    Cart(CartError),
    /// Checkout transition rejected or payment failed.
    Checkout(CheckoutError),
    /// Order history collaborator error.
    Orders(OrderHistoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Catalog(err) => catalog_error_to_response(err),
            ApiError::Cart(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Checkout(err) => checkout_error_to_response(err),
            ApiError::Orders(err) => order_error_to_response(err),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, status = status.as_u16(), "request failed");
        }

        let body = match &self {
            ApiError::Checkout(CheckoutError::Validation(errors)) => {
                serde_json::json!({ "error": message, "fields": errors })
            }
            ApiError::Checkout(err) => {
                serde_json::json!({ "error": message, "recoverable": err.is_recoverable() })
            }
            _ => serde_json::json!({ "error": message }),
        };
        (status, axum::Json(body)).into_response()
    }
}

fn catalog_error_to_response(err: &CatalogError) -> (StatusCode, String) {
    match err {
        CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        CatalogError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
        CatalogError::Malformed(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
    }
}

fn checkout_error_to_response(err: &CheckoutError) -> (StatusCode, String) {
    let status = match err {
        CheckoutError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CheckoutError::InvalidStage { .. }
        | CheckoutError::MissingShippingInfo
        | CheckoutError::MissingPaymentMethod
        | CheckoutError::CartChanged => StatusCode::CONFLICT,
        CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
        CheckoutError::Payment(PaymentError::InvalidCard(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        CheckoutError::Payment(PaymentError::Declined(_)) => StatusCode::PAYMENT_REQUIRED,
        CheckoutError::Payment(PaymentError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        CheckoutError::PaymentTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
    };
    (status, err.to_string())
}

fn order_error_to_response(err: &OrderHistoryError) -> (StatusCode, String) {
    match err {
        OrderHistoryError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        OrderHistoryError::Duplicate(_) => (StatusCode::CONFLICT, err.to_string()),
        OrderHistoryError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
        OrderHistoryError::Malformed(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        ApiError::Cart(err)
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<OrderHistoryError> for ApiError {
    fn from(err: OrderHistoryError) -> Self {
        ApiError::Orders(err)
    }
}
