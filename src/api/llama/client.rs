use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::BatchHistoricalResponse;
use crate::api::error::{handle_error_response, ApiError};

/// Source of batched historical prices
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Fetch prices for every `<chain>:<address>` key at the given unix timestamps
    async fn batch_historical(
        &self,
        coins: &BTreeMap<String, Vec<i64>>,
        search_width: &str,
    ) -> Result<BatchHistoricalResponse, ApiError>;
}

/// DefiLlama coins API client
pub struct CoinsClient {
    http_client: HttpClient,
    base_url: String,
}

impl CoinsClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://coins.llama.fi";

    /// Create a new client with custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PriceOracle for CoinsClient {
    /// GET /batchHistorical?coins={json}&searchWidth={width}
    async fn batch_historical(
        &self,
        coins: &BTreeMap<String, Vec<i64>>,
        search_width: &str,
    ) -> Result<BatchHistoricalResponse, ApiError> {
        let url = format!("{}/batchHistorical", self.base_url);
        let coins_json = serde_json::to_string(coins)
            .map_err(|e| ApiError::RequestError(format!("Failed to encode coins param: {}", e)))?;

        debug!("GET {} coins={} searchWidth={}", url, coins_json, search_width);

        let response = self
            .http_client
            .get(&url)
            .query(&[("coins", coins_json.as_str()), ("searchWidth", search_width)])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        response
            .json::<BatchHistoricalResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
