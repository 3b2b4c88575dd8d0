use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::llama::PriceOracle;
use crate::api::rpc::RpcTransport;
use crate::config::RenderConfig;
use crate::models::{PriceHistory, Snapshot};
use crate::services::balance_service::fetch_balance;
use crate::services::cache_service::SnapshotCache;
use crate::services::price_history_service::{fetch_price_history, sample_timestamps};
use crate::utils::WidgetError;

/// Percent change from `first` to `current`. Zero when `first` is zero.
pub fn percent_change(first: f64, current: f64) -> f64 {
    if first == 0.0 {
        warn!("First price is zero, reporting 0% change");
        return 0.0;
    }
    (current - first) / first * 100.0
}

/// Compute derived metrics and assemble the snapshot
pub fn derive_snapshot(
    symbol: String,
    price_history: PriceHistory,
    balance: Option<f64>,
    last_updated: i64,
) -> Snapshot {
    let first_price = price_history.first().price;
    let current_price = price_history.last().price;
    let price_change = current_price - first_price;

    let (balance, total_value) = match balance {
        Some(b) => (b, b * current_price),
        None => (0.0, 0.0),
    };

    Snapshot {
        symbol,
        current_price,
        price_change,
        percent_change: percent_change(first_price, current_price),
        price_history,
        balance,
        total_value,
        last_updated,
    }
}

/// Build one snapshot: history, then balance, then derived metrics, then cache
///
/// Any retrieval failure aborts the build unchanged. Cache failures are
/// logged and ignored.
pub async fn build_snapshot(
    config: &RenderConfig,
    oracle: &dyn PriceOracle,
    rpc: &dyn RpcTransport,
    cache: &SnapshotCache,
    now: DateTime<Utc>,
) -> Result<Snapshot, WidgetError> {
    let coin_key = config.coin_key();
    let timestamps = sample_timestamps(now, &config.sampling);

    let token = fetch_price_history(oracle, &coin_key, &timestamps, &config.sampling.search_width).await?;

    let balance = if config.tracks_balance() {
        Some(
            fetch_balance(
                rpc,
                &config.wallet_address,
                &config.token_address,
                &config.chain,
                config.token_decimals,
            )
            .await?,
        )
    } else {
        None
    };

    let snapshot = derive_snapshot(token.symbol, token.history, balance, now.timestamp_millis());

    info!(
        "📸 Snapshot {} price={} change={:+.4} ({:+.2}%)",
        snapshot.symbol, snapshot.current_price, snapshot.price_change, snapshot.percent_change
    );

    cache.write_best_effort(&snapshot);

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::llama::BatchHistoricalResponse;
    use crate::api::ApiError;
    use crate::models::PricePoint;
    use crate::services::balance_service::tests::FakeRpc;
    use crate::services::price_history_service::tests::FakeOracle;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::fs;

    const TOKEN: &str = "0xec53bF9167f50cDEB3Ae105f56099aaaB9061F83";
    const WALLET: &str = "0x2222222222222222222222222222222222222222";

    fn config(chain: &str, wallet: &str, cache_dir: &std::path::Path) -> RenderConfig {
        let mut vars = HashMap::new();
        vars.insert("TOKEN_ADDRESS", TOKEN.to_string());
        vars.insert("CHAIN", chain.to_string());
        vars.insert("WALLET_ADDRESS", wallet.to_string());
        vars.insert("CACHE_DIR", cache_dir.display().to_string());
        RenderConfig::from_lookup(|k| vars.get(k).cloned()).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn example_oracle(chain: &str) -> FakeOracle {
        FakeOracle::with_prices(
            &format!("{}:{}", chain, TOKEN),
            "mpl",
            &[(400, 110.0), (100, 100.0), (300, 95.0), (200, 105.0)],
        )
    }

    #[test]
    fn test_derived_metrics() {
        let history = PriceHistory::from_points(vec![
            PricePoint { timestamp: 1, price: 100.0 },
            PricePoint { timestamp: 2, price: 105.0 },
            PricePoint { timestamp: 3, price: 95.0 },
            PricePoint { timestamp: 4, price: 110.0 },
        ])
        .unwrap();
        let snapshot = derive_snapshot("TKN".to_string(), history, Some(2.0), 5);
        assert_eq!(snapshot.current_price, 110.0);
        assert_eq!(snapshot.price_change, 10.0);
        assert!((snapshot.percent_change - 10.0).abs() < 1e-9);
        assert_eq!(snapshot.total_value, 220.0);
    }

    #[test]
    fn test_zero_first_price_is_zero_percent() {
        assert_eq!(percent_change(0.0, 5.0), 0.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(2.0, 1.0), -50.0);
    }

    #[tokio::test]
    async fn test_without_wallet_no_rpc_call() {
        let dir = tempfile::tempdir().unwrap();
        let config = config("ethereum", "", dir.path());
        let oracle = example_oracle("ethereum");
        let rpc = FakeRpc::with_result("0x0de0b6b3a7640000");
        let cache = SnapshotCache::new(&config.cache_dir);

        let snapshot = build_snapshot(&config, &oracle, &rpc, &cache, now()).await.unwrap();

        assert_eq!(snapshot.symbol, "mpl");
        assert_eq!(snapshot.current_price, 110.0);
        assert_eq!(snapshot.balance, 0.0);
        assert_eq!(snapshot.total_value, 0.0);
        assert_eq!(snapshot.last_updated, 1_700_000_000_000);
        assert_eq!(rpc.call_count(), 0);
        assert_eq!(cache.read_latest(), Some(snapshot));
    }

    #[tokio::test]
    async fn test_with_wallet_values_balance() {
        let dir = tempfile::tempdir().unwrap();
        let config = config("ethereum", WALLET, dir.path());
        let oracle = example_oracle("ethereum");
        let rpc = FakeRpc::with_result("0x0de0b6b3a7640000");
        let cache = SnapshotCache::new(&config.cache_dir);

        let snapshot = build_snapshot(&config, &oracle, &rpc, &cache, now()).await.unwrap();

        assert_eq!(snapshot.balance, 1.0);
        assert_eq!(snapshot.total_value, 110.0);
        assert_eq!(rpc.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_chain_with_wallet_fails_without_rpc() {
        let dir = tempfile::tempdir().unwrap();
        let config = config("fantom", WALLET, dir.path());
        let oracle = example_oracle("fantom");
        let rpc = FakeRpc::with_result("0x1");
        let cache = SnapshotCache::new(&config.cache_dir);

        let err = build_snapshot(&config, &oracle, &rpc, &cache, now()).await.unwrap_err();

        assert!(matches!(err, WidgetError::Configuration(_)));
        assert_eq!(rpc.call_count(), 0);
        assert!(!cache.path().exists(), "failed builds are never cached");
    }

    #[tokio::test]
    async fn test_price_failure_aborts_before_balance() {
        let dir = tempfile::tempdir().unwrap();
        let config = config("ethereum", WALLET, dir.path());
        let oracle = FakeOracle::with_response(Ok(BatchHistoricalResponse::default()));
        let rpc = FakeRpc::with_result("0x1");
        let cache = SnapshotCache::new(&config.cache_dir);

        let err = build_snapshot(&config, &oracle, &rpc, &cache, now()).await.unwrap_err();

        assert!(matches!(err, WidgetError::DataUnavailable(_)));
        assert_eq!(oracle.call_count(), 1);
        assert_eq!(rpc.call_count(), 0);
        assert!(!cache.path().exists());
    }

    #[tokio::test]
    async fn test_balance_failure_aborts_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let config = config("ethereum", WALLET, dir.path());
        let oracle = example_oracle("ethereum");
        let rpc = FakeRpc::with_response(Err(ApiError::RequestError("connection refused".to_string())));
        let cache = SnapshotCache::new(&config.cache_dir);

        let err = build_snapshot(&config, &oracle, &rpc, &cache, now()).await.unwrap_err();

        assert!(matches!(err, WidgetError::Transport(_)));
        assert!(!cache.path().exists());
    }

    #[tokio::test]
    async fn test_cache_failure_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let config = config("ethereum", "", &blocker);
        let oracle = example_oracle("ethereum");
        let rpc = FakeRpc::with_result("0x0");
        let cache = SnapshotCache::new(&config.cache_dir);

        let snapshot = build_snapshot(&config, &oracle, &rpc, &cache, now()).await.unwrap();
        assert_eq!(snapshot.price_change, 10.0);
    }
}
