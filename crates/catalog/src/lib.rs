//! Product catalog for the storefront.
//!
//! This crate provides:
//! - [`Product`] as returned by the public catalog API
//! - [`CatalogService`] trait for the read-only catalog collaborator
//! - [`InMemoryCatalog`] seeded from the catalog's JSON format
//! - [`ProductQuery`] for category, price, search and sort browsing

pub mod error;
pub mod product;
pub mod query;
pub mod service;

pub use error::{CatalogError, Result};
pub use product::{Product, Rating};
pub use query::{ProductQuery, SortOrder, categories};
pub use service::{CatalogService, InMemoryCatalog};
