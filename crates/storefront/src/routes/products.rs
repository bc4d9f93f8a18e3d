//! Catalog browsing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use catalog::{CatalogService, Product, ProductQuery, SortOrder};
use common::{Money, ProductId};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductParams {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub sort: SortOrder,
    pub q: Option<String>,
}

impl ProductParams {
    fn into_query(self) -> Result<ProductQuery, ApiError> {
        let min_price = self.min_price.map(parse_price).transpose()?;
        let max_price = self.max_price.map(parse_price).transpose()?;
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(ApiError::BadRequest(format!(
                    "min_price {min} is greater than max_price {max}"
                )));
            }
        }

        Ok(ProductQuery {
            category: self.category,
            min_price,
            max_price,
            search: self.q.filter(|q| !q.trim().is_empty()),
            sort: self.sort,
        })
    }
}

fn parse_price(value: f64) -> Result<Money, ApiError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::BadRequest(format!("Invalid price: {value}")));
    }
    Ok(Money::from_decimal(value))
}

/// GET /products: filtered and sorted product list.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let query = params.into_query()?;
    let products = state.catalog.list_products().await?;
    Ok(Json(query.apply(&products)))
}

/// GET /products/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ApiError> {
    let product = state.catalog.get_product(ProductId::new(id)).await?;
    Ok(Json(product))
}

/// GET /categories: distinct categories in catalog order.
#[tracing::instrument(skip(state))]
pub async fn categories(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let products = state.catalog.list_products().await?;
    Ok(Json(catalog::categories(&products)))
}
