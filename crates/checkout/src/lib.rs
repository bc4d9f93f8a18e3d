//! Checkout flow for the storefront.
//!
//! Checkout is a linear state machine driven only by explicit user actions:
//!
//! 1. Shipping: validate the shipping form
//! 2. Payment: tokenize the card through the payment collaborator (no charge)
//! 3. Review: confirm the payment method against the cart total
//!
//! A successful confirmation clears the cart and ends in `Confirmed`.

pub mod config;
pub mod error;
pub mod flow;
pub mod payment;
pub mod shipping;
pub mod stage;

pub use config::CheckoutConfig;
pub use error::CheckoutError;
pub use flow::{CheckoutFlow, CheckoutSession, OrderConfirmation};
pub use payment::{
    CardDetails, InMemoryPaymentCollaborator, PaymentCollaborator, PaymentConfirmation,
    PaymentError, PaymentMethodToken,
};
pub use shipping::{FieldError, ShippingField, ShippingInfo, ValidationErrors};
pub use stage::CheckoutStage;
