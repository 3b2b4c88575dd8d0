use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;
mod widget;

use api::llama::CoinsClient;
use api::rpc::JsonRpcClient;
use config::RenderConfig;
use services::cache_service::SnapshotCache;
use widget::{present, render_widget, TextPreview};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("token_widget=debug".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap()))
        .with_target(true)
        .init();

    info!("💹 Starting token widget...");

    let config = match RenderConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            error!("Supported chains: {}", utils::chains::supported_chains().join(", "));
            std::process::exit(1);
        }
    };

    info!(
        "Tracking {} (balance tracking {})",
        config.coin_key(),
        if config.tracks_balance() { "on" } else { "off" }
    );

    let oracle = CoinsClient::with_base_url(config.price_api_url.clone());
    let rpc = JsonRpcClient::new();
    let cache = SnapshotCache::new(&config.cache_dir);

    let widget = render_widget(&config, &oracle, &rpc, &cache, chrono::Utc::now()).await;

    let mut preview = TextPreview::new();
    present(&widget, &mut preview);
    println!("{}", preview.render());
}
