//! `ProductService`: the catalog facade used by presentation code.

use std::sync::Arc;

use tokio::sync::OnceCell;

use catalogsync_core::{CategoryId, ProductId};
use catalogsync_events::Subscription;
use catalogsync_products::{Category, EditIntent, Product, Supplier};

use crate::config::CatalogConfig;
use crate::fetcher::EntityFetcher;
use crate::pipeline::CatalogPipeline;
use crate::source::CollectionSource;

/// Owns the three entity fetchers and the pipeline they feed.
///
/// Views are exposed as subscriptions; user intents go in through the command
/// methods. Nothing outside the service writes pipeline state directly.
#[derive(Debug)]
pub struct ProductService {
    config: CatalogConfig,
    products: EntityFetcher<Product>,
    categories: EntityFetcher<Category>,
    suppliers: EntityFetcher<Supplier>,
    pipeline: CatalogPipeline,
    loaded: OnceCell<()>,
}

impl ProductService {
    pub fn new(
        config: CatalogConfig,
        products: Arc<dyn CollectionSource<Product>>,
        categories: Arc<dyn CollectionSource<Category>>,
        suppliers: Arc<dyn CollectionSource<Supplier>>,
    ) -> Self {
        let pipeline = CatalogPipeline::new(config.price_markup);
        Self {
            config,
            products: EntityFetcher::new("products", products),
            categories: EntityFetcher::new("categories", categories),
            suppliers: EntityFetcher::new("suppliers", suppliers),
            pipeline,
            loaded: OnceCell::new(),
        }
    }

    /// Service backed by the configured HTTP API.
    #[cfg(feature = "http")]
    pub fn over_http(config: CatalogConfig) -> Self {
        use crate::http::HttpSource;

        let client = reqwest::Client::new();
        let products = HttpSource::<Product>::new(client.clone(), config.resource_url(&config.products_path));
        let categories =
            HttpSource::<Category>::new(client.clone(), config.resource_url(&config.categories_path));
        let suppliers = HttpSource::<Supplier>::new(client, config.resource_url(&config.suppliers_path));

        Self::new(config, Arc::new(products), Arc::new(categories), Arc::new(suppliers))
    }

    pub fn pipeline(&self) -> &CatalogPipeline {
        &self.pipeline
    }

    /// Fetch all three collections and feed them to the pipeline as each arrives.
    ///
    /// Runs once per session; later and concurrent calls wait for the first one
    /// and then return without touching the sources or re-emitting anything.
    pub async fn load(&self) {
        self.loaded
            .get_or_init(|| async {
                tokio::join!(
                    self.load_products(),
                    self.load_categories(),
                    self.load_suppliers()
                );
            })
            .await;
    }

    /// Refetch products from the source and publish them as a new base snapshot.
    ///
    /// The snapshot replaces the reconciled list; local edits made since the
    /// previous snapshot are dropped.
    pub async fn refresh_products(&self) {
        self.products.invalidate().await;
        self.load_products().await;
    }

    async fn load_products(&self) {
        let result = self.products.fetch_all().await;
        self.pipeline.ingest_products(result);
    }

    async fn load_categories(&self) {
        let result = self.categories.fetch_all().await;
        self.pipeline.ingest_categories(result);
    }

    async fn load_suppliers(&self) {
        let result = self.suppliers.fetch_all().await;
        self.pipeline.ingest_suppliers(result);
    }

    // --- commands ---

    pub fn select_product(&self, id: ProductId) {
        self.pipeline.select_product(id);
    }

    pub fn select_category(&self, category: Option<CategoryId>) {
        self.pipeline.select_category(category);
    }

    /// Append `item`, or the configured placeholder product when `None`.
    pub fn add_product(&self, item: Option<Product>) {
        // TODO: hand out a fresh id per placeholder once the catalog API can allocate ids.
        self.pipeline.submit_add(item, &self.config.placeholder);
    }

    /// Submit an update that restocks `product` by one unit.
    pub fn update_product(&self, product: &Product) {
        self.pipeline.submit(EditIntent::restock(product));
    }

    pub fn delete_product(&self, product: &Product) {
        self.pipeline.submit(EditIntent::delete(product));
    }

    // --- views ---

    pub fn products_enriched(&self) -> Subscription<Vec<Product>> {
        self.pipeline.products_enriched()
    }

    pub fn products_reconciled(&self) -> Subscription<Vec<Product>> {
        self.pipeline.products_reconciled()
    }

    pub fn selected_product(&self) -> Subscription<Option<Product>> {
        self.pipeline.selected_product()
    }

    pub fn selected_product_suppliers(&self) -> Subscription<Vec<Supplier>> {
        self.pipeline.selected_product_suppliers()
    }

    pub fn categories(&self) -> Subscription<Vec<Category>> {
        self.pipeline.categories()
    }

    pub fn products_in_category(&self) -> Subscription<Vec<Product>> {
        self.pipeline.products_in_category()
    }

    pub fn errors(&self) -> Subscription<String> {
        self.pipeline.errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;
    use catalogsync_core::SupplierId;

    struct Sources {
        products: Arc<InMemorySource<Product>>,
        categories: Arc<InMemorySource<Category>>,
        suppliers: Arc<InMemorySource<Supplier>>,
    }

    fn service() -> (ProductService, Sources) {
        let sources = Sources {
            products: Arc::new(InMemorySource::new(vec![
                Product::new(ProductId::new(1), "Leaf Rake", "GDN-0011")
                    .in_category(CategoryId::new(1))
                    .with_price(19.95)
                    .with_suppliers([SupplierId::new(1)]),
            ])),
            categories: Arc::new(InMemorySource::new(vec![Category::new(CategoryId::new(1), "Garden")])),
            suppliers: Arc::new(InMemorySource::new(vec![Supplier::new(SupplierId::new(1), "Acme")])),
        };
        let service = ProductService::new(
            CatalogConfig::default(),
            sources.products.clone(),
            sources.categories.clone(),
            sources.suppliers.clone(),
        );
        (service, sources)
    }

    #[tokio::test]
    async fn load_runs_once() {
        let (service, sources) = service();
        service.load().await;
        service.load().await;

        assert_eq!(sources.products.calls(), 1);
        assert_eq!(sources.categories.calls(), 1);
        assert_eq!(sources.suppliers.calls(), 1);
        assert_eq!(service.pipeline().computations().0, 1);
    }

    #[tokio::test]
    async fn add_without_item_uses_the_placeholder() {
        let (service, _) = service();
        service.load().await;

        service.add_product(None);
        service.add_product(None);

        let reconciled = service.pipeline().current_reconciled().unwrap();
        assert_eq!(reconciled.len(), 3);
        assert_eq!(reconciled[1].id, ProductId::new(42));
        assert_eq!(reconciled[2].id, ProductId::new(42));
    }

    #[tokio::test]
    async fn update_restocks_and_delete_removes() {
        let (service, _) = service();
        service.load().await;
        let rake = service.pipeline().current_reconciled().unwrap()[0].clone();

        service.update_product(&rake);
        let updated = service.pipeline().current_reconciled().unwrap();
        assert_eq!(updated[0].quantity_in_stock, Some(1));

        service.delete_product(&updated[0]);
        assert_eq!(service.pipeline().current_reconciled(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn refresh_replaces_local_edits() {
        let (service, sources) = service();
        service.load().await;
        service.add_product(None);

        sources.products.respond_with(Ok(vec![
            Product::new(ProductId::new(7), "Hammer", "TBX-0048"),
            Product::new(ProductId::new(8), "Saw", "TBX-0022"),
        ]));
        service.refresh_products().await;

        let ids: Vec<ProductId> = service
            .pipeline()
            .current_reconciled()
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![ProductId::new(7), ProductId::new(8)]);
        assert_eq!(sources.products.calls(), 2);
    }
}
