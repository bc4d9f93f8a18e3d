//! Catalog collaborator trait and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use crate::error::{CatalogError, Result};
use crate::product::Product;

/// Demonstration catalog in the public catalog API's response format.
const SEED_PRODUCTS: &str = include_str!("../data/products.json");

/// Read-only access to the product catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists every product in catalog order.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Fetches a single product.
    async fn get_product(&self, id: ProductId) -> Result<Product>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: Vec<Product>,
    unavailable: Option<String>,
}

/// In-memory catalog for tests and the local storefront.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    /// Creates a catalog holding the given products.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryCatalogState {
                products,
                unavailable: None,
            })),
        }
    }

    /// Parses a catalog API `/products` response body.
    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Creates a catalog seeded with the bundled demonstration products.
    pub fn seeded() -> Result<Self> {
        Self::from_json(SEED_PRODUCTS)
    }

    /// Makes every call fail with [`CatalogError::Unavailable`] until reset with `None`.
    pub async fn set_unavailable(&self, reason: Option<String>) {
        self.state.write().await.unavailable = reason;
    }

    /// Returns the number of products.
    pub async fn product_count(&self) -> usize {
        self.state.read().await.products.len()
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let state = self.state.read().await;
        if let Some(reason) = &state.unavailable {
            tracing::warn!(%reason, "catalog unavailable");
            return Err(CatalogError::Unavailable(reason.clone()));
        }
        Ok(state.products.clone())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product> {
        let state = self.state.read().await;
        if let Some(reason) = &state.unavailable {
            tracing::warn!(%reason, %id, "catalog unavailable");
            return Err(CatalogError::Unavailable(reason.clone()));
        }
        state
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
