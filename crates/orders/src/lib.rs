//! Order history for the storefront.
//!
//! Orders are read-only from the customer's point of view. The in-memory
//! store is seeded with demonstration orders and records orders placed
//! through checkout.

pub mod error;
pub mod history;
pub mod order;

pub use error::{OrderHistoryError, Result};
pub use history::{InMemoryOrderHistory, OrderHistoryService};
pub use order::{Order, OrderLine, OrderStatus};
