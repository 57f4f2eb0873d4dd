use anyhow::Context;

use catalogsync_client::{CatalogConfig, ProductService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalogsync_observability::init();

    let config = CatalogConfig::from_env().context("invalid catalog configuration")?;
    tracing::info!(api = %config.api_base_url, "loading catalog");

    let service = ProductService::over_http(config);
    let mut errors = service.errors();
    service.load().await;

    for message in errors.drain() {
        tracing::error!(%message, "catalog source failed");
    }

    let products = service.pipeline().current_reconciled().unwrap_or_default();
    tracing::info!(count = products.len(), "catalog ready");
    for product in &products {
        tracing::info!(
            id = %product.id,
            name = %product.name,
            category = product.category.as_deref().unwrap_or("-"),
            price = product.price.unwrap_or(0.0),
            "product"
        );
    }

    if let Some(first) = products.first() {
        service.select_product(first.id);
        let suppliers = service
            .pipeline()
            .current_selected_suppliers()
            .unwrap_or_default();
        tracing::info!(
            product = %first.name,
            suppliers = suppliers.len(),
            "selected first product"
        );
    }

    Ok(())
}
