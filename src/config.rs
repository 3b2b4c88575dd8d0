use std::path::PathBuf;

use chrono::Duration;

use crate::api::llama::CoinsClient;
use crate::models::ChartDimensions;
use crate::utils::WidgetError;

const DEFAULT_CHAIN: &str = "ethereum";
const DEFAULT_DEVICE_SCALE: f64 = 2.0;
const MAX_DEVICE_SCALE: f64 = 10.0;
const DEFAULT_TOKEN_DECIMALS: u32 = 18;
const CACHE_DIR_NAME: &str = "token-widget";

/// When to sample the price oracle
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingPolicy {
    pub points: usize,
    pub spacing: Duration,
    /// Oracle tolerance around each requested timestamp
    pub search_width: String,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            points: 7,
            spacing: Duration::hours(4),
            search_width: "4h".to_string(),
        }
    }
}

/// Process-wide configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub token_address: String,
    /// Lowercase chain identifier
    pub chain: String,
    /// Empty disables balance tracking
    pub wallet_address: String,
    pub device_scale: f64,
    pub chart: ChartDimensions,
    pub token_decimals: u32,
    pub sampling: SamplingPolicy,
    pub price_api_url: String,
    pub cache_dir: PathBuf,
}

impl RenderConfig {
    /// Load configuration from process environment (after `.env` is applied)
    pub fn from_env() -> Result<Self, WidgetError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WidgetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token_address = get("TOKEN_ADDRESS")
            .ok_or_else(|| WidgetError::Configuration("TOKEN_ADDRESS not set".to_string()))?;

        let chain = get("CHAIN")
            .unwrap_or_else(|| DEFAULT_CHAIN.to_string())
            .to_lowercase();

        let wallet_address = get("WALLET_ADDRESS").unwrap_or_default();

        let device_scale = match get("DEVICE_SCALE") {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|s| s.is_finite() && *s > 0.0 && *s <= MAX_DEVICE_SCALE)
                .ok_or_else(|| {
                    WidgetError::Configuration(format!(
                        "DEVICE_SCALE must be a number in (0, {}], got '{}'",
                        MAX_DEVICE_SCALE, raw
                    ))
                })?,
            None => DEFAULT_DEVICE_SCALE,
        };

        let token_decimals = match get("TOKEN_DECIMALS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                // 10^77 is the largest power of ten a uint256 can reach
                .filter(|d| *d <= 77)
                .ok_or_else(|| {
                    WidgetError::Configuration(format!("TOKEN_DECIMALS must be an integer in 0..=77, got '{}'", raw))
                })?,
            None => DEFAULT_TOKEN_DECIMALS,
        };

        let price_api_url = get("PRICE_API_URL").unwrap_or_else(|| CoinsClient::DEFAULT_BASE_URL.to_string());

        let cache_dir = get("CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_dir);

        Ok(Self {
            token_address,
            chain,
            wallet_address,
            device_scale,
            chart: ChartDimensions::default(),
            token_decimals,
            sampling: SamplingPolicy::default(),
            price_api_url,
            cache_dir,
        })
    }

    pub fn tracks_balance(&self) -> bool {
        !self.wallet_address.is_empty()
    }

    /// Oracle key for the tracked token, e.g. `ethereum:0xabc...`
    pub fn coin_key(&self) -> String {
        format!("{}:{}", self.chain, self.token_address)
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_DIR_NAME)
}
