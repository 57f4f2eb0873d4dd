use serde::{Deserialize, Serialize};

use catalogsync_core::{Entity, SupplierId};

/// Supplier record. Only `id` takes part in selection; the rest is carried through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: SupplierId,
    #[serde(rename = "supplierName")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub minimum_quantity: Option<i64>,
}

impl Supplier {
    pub fn new(id: SupplierId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            cost_price: None,
            minimum_quantity: None,
        }
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> SupplierId {
        self.id
    }
}
