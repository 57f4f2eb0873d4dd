//! User-issued edit intents.

use serde::{Deserialize, Serialize};

use catalogsync_core::{CategoryId, ProductId};

use crate::product::Product;

/// Kind of edit carried by an [`EditIntent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditAction {
    Add,
    Update,
    Delete,
}

impl EditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditAction::Add => "add",
            EditAction::Update => "update",
            EditAction::Delete => "delete",
        }
    }
}

/// A single add/update/delete request targeting one product.
///
/// Intents are not validated when created; the reconciler absorbs ones that
/// target missing products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "item", rename_all = "lowercase")]
pub enum EditIntent {
    Add(Product),
    Update(Product),
    Delete(Product),
}

impl EditIntent {
    /// Update intent that bumps the stock of `product` by one.
    ///
    /// Restocking is the only field edit the catalog supports.
    pub fn restock(product: &Product) -> Self {
        EditIntent::Update(restocked(product))
    }

    pub fn delete(product: &Product) -> Self {
        EditIntent::Delete(product.clone())
    }

    pub fn action(&self) -> EditAction {
        match self {
            EditIntent::Add(_) => EditAction::Add,
            EditIntent::Update(_) => EditAction::Update,
            EditIntent::Delete(_) => EditAction::Delete,
        }
    }

    pub fn item(&self) -> &Product {
        match self {
            EditIntent::Add(item) | EditIntent::Update(item) | EditIntent::Delete(item) => item,
        }
    }

    pub fn into_item(self) -> Product {
        match self {
            EditIntent::Add(item) | EditIntent::Update(item) | EditIntent::Delete(item) => item,
        }
    }
}

/// Copy of `product` with one more unit in stock (absent stock counts as 0).
pub fn restocked(product: &Product) -> Product {
    Product {
        quantity_in_stock: Some(product.quantity_in_stock.unwrap_or(0).saturating_add(1)),
        ..product.clone()
    }
}

/// Product synthesized when an add is requested without an item.
///
/// Every call returns the same id (42), so repeated adds collide.
pub fn placeholder_product() -> Product {
    let mut product = Product::new(ProductId::new(42), "Another One", "TBX-0042")
        .with_description("Our new product")
        .with_price(8.9)
        .in_category(CategoryId::new(3))
        .with_stock(30);
    product.category = Some("Toolbox".to_string());
    product
}
