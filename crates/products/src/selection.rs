//! Selection and filtering derivations over a product list.

use catalogsync_core::{CategoryId, ProductId, find_by_id};

use crate::product::Product;
use crate::supplier::Supplier;

/// Product with `id` in `products`, or `None` on a miss.
///
/// The no-selection sentinel is an ordinary id here; it selects nothing only
/// because no real product normally carries it.
pub fn find_selected(products: &[Product], id: ProductId) -> Option<Product> {
    find_by_id(products, id).cloned()
}

/// Suppliers listed on `selected`, in supplier-list order.
pub fn suppliers_for(selected: Option<&Product>, suppliers: &[Supplier]) -> Vec<Supplier> {
    let Some(product) = selected else {
        return Vec::new();
    };
    suppliers
        .iter()
        .filter(|s| product.is_supplied_by(s.id))
        .cloned()
        .collect()
}

/// Products in `category`, or every product when no category is chosen.
pub fn filter_by_category(products: &[Product], category: Option<CategoryId>) -> Vec<Product> {
    match category {
        Some(id) => products
            .iter()
            .filter(|p| p.category_id == Some(id))
            .cloned()
            .collect(),
        None => products.to_vec(),
    }
}
