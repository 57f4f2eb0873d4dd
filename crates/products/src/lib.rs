//! Product catalog domain module.
//!
//! This crate contains the catalog's business rules, implemented purely as
//! deterministic logic over in-memory collections (no IO, no async, no channels):
//! enrichment, edit intents, reconciliation and selection.

pub mod enrich;
pub mod intent;
pub mod product;
pub mod reconcile;
pub mod selection;
pub mod supplier;

pub use enrich::{PriceMarkup, enrich, enrich_all};
pub use intent::{EditAction, EditIntent, placeholder_product, restocked};
pub use product::{Category, Product, ProductCollection};
pub use reconcile::{FoldInput, ProductReconciler, reconcile};
pub use selection::{filter_by_category, find_selected, suppliers_for};
pub use supplier::Supplier;
