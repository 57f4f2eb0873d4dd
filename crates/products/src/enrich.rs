//! Product enrichment: joins products with categories.
//!
//! Enrichment is pure and total. A product whose `category_id` matches no
//! category simply ends up without a category name.

use catalogsync_core::find_by_id;

use crate::product::{Category, Product};

/// Multiplier applied to every product price during enrichment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMarkup(f64);

impl PriceMarkup {
    pub const DEFAULT: PriceMarkup = PriceMarkup(1.5);

    /// `None` unless `factor` is finite and non-negative.
    pub fn new(factor: f64) -> Option<Self> {
        (factor.is_finite() && factor >= 0.0).then_some(Self(factor))
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    /// Marked-up price; an absent price becomes 0.
    pub fn apply(self, price: Option<f64>) -> f64 {
        price.map_or(0.0, |p| p * self.0)
    }
}

impl Default for PriceMarkup {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Enrich one product against the current category list.
///
/// - `price` is marked up (absent price → 0)
/// - `category` is recomputed from `category_id`, overwriting whatever the record carried
/// - `search_key` is set to the product name
pub fn enrich(product: &Product, categories: &[Category], markup: PriceMarkup) -> Product {
    let category = product
        .category_id
        .and_then(|id| find_by_id(categories, id))
        .map(|c| c.name.clone());

    Product {
        price: Some(markup.apply(product.price)),
        category,
        search_key: Some(vec![product.name.clone()]),
        ..product.clone()
    }
}

/// Enrich a whole collection, preserving order.
pub fn enrich_all(products: &[Product], categories: &[Category], markup: PriceMarkup) -> Vec<Product> {
    products
        .iter()
        .map(|p| enrich(p, categories, markup))
        .collect()
}
