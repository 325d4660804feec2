//! Demo entry point: loads the configuration, mounts the shell of the stored
//! session and prints the first page of the catalog.

use resource_store::StoreClient;
use shopfront::clients::ProductClient;
use shopfront::config::AppConfig;
use shopfront::runtime::{setup_tracing, ShopSystem};
use shopfront::view::{format_amount, paginate, ProductQuery, SortKey, ViewState};
use std::path::PathBuf;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config_path = std::env::var("SHOPFRONT_CONFIG").ok().map(PathBuf::from);
    let config = AppConfig::load(config_path).map_err(|e| e.to_string())?;
    info!(api = %config.api.base_url, "Starting shopfront");

    let page_size = config.catalog.page_size;
    let system = ShopSystem::start(config).await.map_err(|e| e.to_string())?;

    let shell = system
        .mount_current()
        .instrument(tracing::info_span!("mount"))
        .await;
    info!(%shell, role = %system.session_context().role(), "Shell mounted");

    let snapshot = system.products.snapshot().await.map_err(|e| e.to_string())?;
    let query = ProductQuery {
        sort: SortKey::PriceLowToHigh,
        active_only: true,
        ..Default::default()
    };
    let visible = query.apply(&snapshot.collection);

    match ViewState::derived(&snapshot, ProductClient::FETCH_ALL, &visible) {
        ViewState::Loading => info!("Catalog is still loading"),
        ViewState::Failed(message) => error!(%message, "Catalog unavailable"),
        ViewState::Empty => info!("No products to show"),
        ViewState::Ready(products) => {
            let page = paginate(&products, 1, page_size);
            info!(page = page.page, total_pages = page.total_pages, "Catalog");
            for product in &page.items {
                info!(
                    id = %product.product_id,
                    price = %format_amount(product.price),
                    "{}",
                    product.product_name
                );
            }
        }
    }

    system.shutdown().await.map_err(|e| e.to_string())?;
    Ok(())
}
