//! Browse queries over a product list.

use common::Money;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Category value that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// Sort order for a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    /// Highest rated first.
    Rating,
}

/// Filters and ordering applied to the product listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Category to keep; `None` or `"all"` keeps every category.
    pub category: Option<String>,

    /// Inclusive lower price bound.
    pub min_price: Option<Money>,

    /// Inclusive upper price bound.
    pub max_price: Option<Money>,

    /// Case-insensitive substring of the title.
    pub search: Option<String>,

    #[serde(default)]
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Creates a query that keeps everything in catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price_range(mut self, min: Money, max: Money) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Returns true if the product passes every filter in the query.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => product.category == category,
        };
        let min_ok = self.min_price.is_none_or(|min| product.price >= min);
        let max_ok = self.max_price.is_none_or(|max| product.price <= max);
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => product
                .title
                .to_lowercase()
                .contains(&term.to_lowercase()),
        };

        category_ok && min_ok && max_ok && search_ok
    }

    /// Filters and sorts a product list.
    ///
    /// Sorting is stable, so products that compare equal keep catalog order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut selected: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Default => {}
            SortOrder::PriceAsc => selected.sort_by_key(|p| p.price),
            SortOrder::PriceDesc => selected.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Rating => selected.sort_by(|a, b| b.rating.rate.total_cmp(&a.rating.rate)),
        }

        selected
    }
}

/// Returns the distinct categories of a product list in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.iter().any(|c| c == &product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new(1u64, "Backpack", Money::from_cents(10995), "men's clothing", "a")
                .with_rating(3.9, 120),
            Product::new(2u64, "Slim Fit T-Shirt", Money::from_cents(2230), "men's clothing", "b")
                .with_rating(4.1, 259),
            Product::new(3u64, "Gold Bracelet", Money::from_cents(69500), "jewelery", "c")
                .with_rating(4.6, 400),
            Product::new(4u64, "SSD 1TB", Money::from_cents(10900), "electronics", "d")
                .with_rating(2.9, 470),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.as_u64()).collect()
    }

    #[test]
    fn test_empty_query_keeps_catalog_order() {
        assert_eq!(ids(&ProductQuery::new().apply(&products())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_all_category_matches_everything() {
        let query = ProductQuery::new().category("all");
        assert_eq!(query.apply(&products()).len(), 4);
    }

    #[test]
    fn test_category_filter() {
        let query = ProductQuery::new().category("men's clothing");
        assert_eq!(ids(&query.apply(&products())), vec![1, 2]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let query =
            ProductQuery::new().price_range(Money::from_cents(2230), Money::from_cents(10900));
        assert_eq!(ids(&query.apply(&products())), vec![2, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = ProductQuery::new().search("sSd");
        assert_eq!(ids(&query.apply(&products())), vec![4]);

        let blank = ProductQuery::new().search("   ");
        assert_eq!(blank.apply(&products()).len(), 4);
    }

    #[test]
    fn test_sort_orders() {
        let p = products();
        assert_eq!(
            ids(&ProductQuery::new().sort(SortOrder::PriceAsc).apply(&p)),
            vec![2, 4, 1, 3]
        );
        assert_eq!(
            ids(&ProductQuery::new().sort(SortOrder::PriceDesc).apply(&p)),
            vec![3, 1, 4, 2]
        );
        assert_eq!(
            ids(&ProductQuery::new().sort(SortOrder::Rating).apply(&p)),
            vec![3, 2, 1, 4]
        );
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            categories(&products()),
            vec!["men's clothing", "jewelery", "electronics"]
        );
    }

    #[test]
    fn test_sort_order_serde_names() {
        let sort: SortOrder = serde_json::from_str(r#""price-desc""#).unwrap();
        assert_eq!(sort, SortOrder::PriceDesc);
    }
}
