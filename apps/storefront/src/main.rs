//! # Storefront Entry Point
//!
//! Headless bootstrap of the state layer: load configuration, hydrate the
//! persisted session and cart, then fetch the first catalog page.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `storefront.toml` and `STOREFRONT_*` overrides
//! 3. Open local storage and connect the API client
//! 4. Report the restored session and cart
//! 5. Fetch catalog page 0

use std::process::ExitCode;

use tracing::{error, info};

use storefront::{init_tracing, AppConfig, Storefront};
use storefront_core::format::format_price;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = AppConfig::load_or_default(None);
    let store = match Storefront::connect(config) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Failed to start storefront");
            return ExitCode::FAILURE;
        }
    };

    match store.auth().user() {
        Some(user) => info!(email = %user.email, admin = store.auth().is_admin(), "Session restored"),
        None => info!("No saved session"),
    }

    let totals = store.cart().totals();
    info!(
        items = totals.item_count,
        total = %format_price(totals.total),
        "Cart restored"
    );

    match store.load_products(0).await {
        Ok(products) => {
            info!(count = products.len(), "Catalog loaded");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to load catalog");
            ExitCode::FAILURE
        }
    }
}
