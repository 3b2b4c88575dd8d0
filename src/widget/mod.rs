//! Render cycle: snapshot, chart, layout

pub mod composer;
pub mod preview;
pub mod surface;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::api::llama::PriceOracle;
use crate::api::rpc::RpcTransport;
use crate::config::RenderConfig;
use crate::models::{Snapshot, Widget};
use crate::services::cache_service::SnapshotCache;
use crate::services::chart_service::render_sparkline;
use crate::services::snapshot_service::build_snapshot;
use crate::utils::WidgetError;

pub use composer::{compose, compose_error, LayoutOptions};
pub use preview::TextPreview;
pub use surface::{present, WidgetSurface};

/// Run one render cycle. Always returns a widget; failures become the error layout.
pub async fn render_widget(
    config: &RenderConfig,
    oracle: &dyn PriceOracle,
    rpc: &dyn RpcTransport,
    cache: &SnapshotCache,
    now: DateTime<Utc>,
) -> Widget {
    let result = match build_snapshot(config, oracle, rpc, cache, now).await {
        Ok(snapshot) => layout_snapshot(config, &snapshot),
        Err(e) => Err(e),
    };

    match result {
        Ok(widget) => {
            info!("🖼️ Widget composed for {}", config.coin_key());
            widget
        }
        Err(e) => {
            error!("Widget render failed: {}", e);
            compose_error(&e)
        }
    }
}

fn layout_snapshot(config: &RenderConfig, snapshot: &Snapshot) -> Result<Widget, WidgetError> {
    let chart = render_sparkline(
        &snapshot.price_history,
        composer::change_color(snapshot),
        config.chart,
        config.device_scale,
    )?;

    let options = LayoutOptions {
        show_balance: config.tracks_balance(),
        chart_size: config.chart,
    };
    Ok(compose(snapshot, chart, &options))
}
