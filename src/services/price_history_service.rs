use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::api::llama::PriceOracle;
use crate::config::SamplingPolicy;
use crate::models::{PriceHistory, PricePoint};
use crate::utils::WidgetError;

/// Normalized oracle result for one token
#[derive(Debug, Clone)]
pub struct TokenHistory {
    pub symbol: String,
    pub history: PriceHistory,
}

/// Sample timestamps in unix seconds, most recent first
/// Example with the default policy: now, now-4h, ..., now-24h
pub fn sample_timestamps(now: DateTime<Utc>, policy: &SamplingPolicy) -> Vec<i64> {
    let now_secs = now.timestamp();
    let step = policy.spacing.num_seconds();
    (0..policy.points as i64).map(|i| now_secs - i * step).collect()
}

/// Fetch the price history for `coin_key` at the given timestamps
///
/// Fails with `DataUnavailable` when the oracle omits the coin or returns
/// no usable prices. Negative and non-finite prices are dropped.
pub async fn fetch_price_history(
    oracle: &dyn PriceOracle,
    coin_key: &str,
    timestamps: &[i64],
    search_width: &str,
) -> Result<TokenHistory, WidgetError> {
    let mut coins = BTreeMap::new();
    coins.insert(coin_key.to_string(), timestamps.to_vec());

    let response = oracle.batch_historical(&coins, search_width).await?;

    let coin = response
        .coin(coin_key)
        .ok_or_else(|| WidgetError::DataUnavailable(format!("No price data returned for {}", coin_key)))?;

    let mut points: Vec<PricePoint> = Vec::with_capacity(coin.prices.len());
    for raw in &coin.prices {
        if raw.price.is_finite() && raw.price >= 0.0 {
            points.push(PricePoint::from(raw));
        } else {
            warn!("Dropping invalid price {} at {} for {}", raw.price, raw.timestamp, coin_key);
        }
    }

    let history = PriceHistory::from_points(points)
        .ok_or_else(|| WidgetError::DataUnavailable(format!("Empty price history for {}", coin_key)))?;

    debug!("Fetched {} price points for {} ({})", history.len(), coin_key, coin.symbol);

    Ok(TokenHistory {
        symbol: coin.symbol.clone(),
        history,
    })
}
