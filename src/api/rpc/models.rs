use serde::{Deserialize, Serialize};

/// Transaction object for a read-only `eth_call`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallObject {
    pub to: String,
    pub data: String,
}

/// JSON-RPC 2.0 request envelope for `eth_call`
#[derive(Debug, Clone, Serialize)]
pub struct EthCallRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: (&'a CallObject, &'static str),
    pub id: u64,
}

impl<'a> EthCallRequest<'a> {
    /// Call against the latest block
    pub fn latest(call: &'a CallObject) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "eth_call",
            params: (call, "latest"),
            id: 1,
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope_shape() {
        let call = CallObject {
            to: "0xtoken".to_string(),
            data: "0x70a08231".to_string(),
        };
        let value = serde_json::to_value(EthCallRequest::latest(&call)).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "method": "eth_call",
                "params": [{"to": "0xtoken", "data": "0x70a08231"}, "latest"],
                "id": 1
            })
        );
    }

    #[test]
    fn test_error_envelope() {
        let resp: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#,
        )
        .unwrap();
        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().message, "execution reverted");
    }
}
