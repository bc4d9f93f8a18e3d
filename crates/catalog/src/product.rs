//! Product value types.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// Average review score and number of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average score, 0.0 to 5.0.
    pub rate: f64,

    /// Number of reviews the average is computed from.
    pub count: u32,
}

/// A product as served by the catalog.
///
/// Field names follow the public catalog's JSON format so a response body can
/// be deserialized directly. Products are immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,

    /// Unit price.
    #[serde(with = "common::money::decimal")]
    pub price: Money,

    #[serde(default)]
    pub description: String,
    pub category: String,

    /// Image URL.
    pub image: String,

    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Creates a product with an empty description and no reviews.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            description: String::new(),
            category: category.into(),
            image: image.into(),
            rating: Rating::default(),
        }
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rate: f64, count: u32) -> Self {
        self.rating = Rating { rate, count };
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_catalog_json() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.cents(), 10995);
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
    }

    #[test]
    fn missing_rating_and_description_default() {
        let json = r#"{"id": 9, "title": "Drive", "price": 64, "category": "electronics", "image": "x"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.rating, Rating::default());
        assert!(product.description.is_empty());
        assert_eq!(product.price.cents(), 6400);
    }
}
