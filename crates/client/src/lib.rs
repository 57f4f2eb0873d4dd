//! `catalogsync-client`
//!
//! **Responsibility:** client-side synchronization layer for the product catalog.
//!
//! This crate provides:
//! - Entity sources and session-cached fetchers (the only async boundary)
//! - The catalog pipeline: enrichment, reconciliation of local edits and
//!   selection, each published through a replaying multicast cell
//! - `ProductService`, the facade presentation code talks to
//!
//! Edits are session-local; nothing here writes back to the remote store.

pub mod config;
pub mod fetcher;
#[cfg(feature = "http")]
pub mod http;
pub mod pipeline;
pub mod service;
pub mod source;

pub use config::{CatalogConfig, ConfigError};
pub use fetcher::EntityFetcher;
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use pipeline::CatalogPipeline;
pub use service::ProductService;
pub use source::{CollectionSource, InMemorySource};
