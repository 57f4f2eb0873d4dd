use serde::{Deserialize, Serialize};

use catalogsync_core::{CategoryId, Entity, ProductId, SupplierId};

/// Ordered product list: a fetched base snapshot or the reconciled working set.
pub type ProductCollection = Vec<Product>;

/// Product record as served by the catalog API.
///
/// Field names on the wire follow the API (`productName`, `quantityInStock`, ...).
/// `category` and `search_key` are derived during enrichment and are never set
/// by edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "productName")]
    pub name: String,
    #[serde(rename = "productCode")]
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub price: Option<f64>,
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub quantity_in_stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_ids: Option<Vec<SupplierId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_key: Option<Vec<String>>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            description: String::new(),
            price: None,
            category_id: None,
            category: None,
            quantity_in_stock: None,
            supplier_ids: None,
            search_key: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_stock(mut self, quantity: i64) -> Self {
        self.quantity_in_stock = Some(quantity);
        self
    }

    pub fn with_suppliers(mut self, supplier_ids: impl IntoIterator<Item = SupplierId>) -> Self {
        self.supplier_ids = Some(supplier_ids.into_iter().collect());
        self
    }

    /// Whether `supplier` is listed for this product.
    pub fn is_supplied_by(&self, supplier: SupplierId) -> bool {
        self.supplier_ids
            .as_deref()
            .is_some_and(|ids| ids.contains(&supplier))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Product category. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}
