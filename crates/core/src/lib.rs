//! `catalogsync-core`: catalog building blocks shared by every layer.
//!
//! This crate contains **pure** primitives (no IO, no async): identifiers,
//! identity lookup and the fetch error surfaced by entity sources.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, find_by_id};
pub use error::{FetchError, FetchResult};
pub use id::{CategoryId, ProductId, SupplierId};
