//! Shared application state.

use cart::Cart;
use catalog::InMemoryCatalog;
use checkout::{CheckoutConfig, CheckoutFlow, InMemoryPaymentCollaborator};
use orders::InMemoryOrderHistory;
use tokio::sync::Mutex;

/// The single shopper session served by this process.
pub struct Session {
    pub cart: Cart,
    pub checkout: CheckoutFlow<InMemoryPaymentCollaborator>,
}

impl Session {
    pub fn new(payment: InMemoryPaymentCollaborator, config: CheckoutConfig) -> Self {
        Self {
            cart: Cart::new(),
            checkout: CheckoutFlow::with_config(payment, config),
        }
    }
}

/// Shared application state accessible from all handlers.
///
/// Collaborators are cheap handles over shared state. The session is behind a
/// tokio mutex because checkout holds it across payment calls.
pub struct AppState {
    pub catalog: InMemoryCatalog,
    pub orders: InMemoryOrderHistory,
    pub payment: InMemoryPaymentCollaborator,
    pub session: Mutex<Session>,
}
