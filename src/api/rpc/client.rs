use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::{CallObject, EthCallRequest, JsonRpcResponse};
use crate::api::error::{handle_error_response, ApiError};

/// Read-only access to a chain's JSON-RPC endpoint
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Issue `eth_call` against the latest block and return the raw envelope
    async fn eth_call(&self, rpc_url: &str, call: &CallObject) -> Result<JsonRpcResponse, ApiError>;
}

/// JSON-RPC over HTTP POST
pub struct JsonRpcClient {
    http_client: HttpClient,
}

impl JsonRpcClient {
    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
        }
    }
}

impl Default for JsonRpcClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RpcTransport for JsonRpcClient {
    async fn eth_call(&self, rpc_url: &str, call: &CallObject) -> Result<JsonRpcResponse, ApiError> {
        debug!("POST {} eth_call to={} data={}", rpc_url, call.to, call.data);

        let response = self
            .http_client
            .post(rpc_url)
            .json(&EthCallRequest::latest(call))
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        response
            .json::<JsonRpcResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
