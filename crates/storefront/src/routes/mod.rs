//! HTTP handlers grouped by resource.

pub mod cart;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod products;
