use tracing::{debug, info};

use crate::api::rpc::{CallObject, RpcTransport};
use crate::utils::{rpc_url_for, WidgetError};

/// `balanceOf(address)` function selector
pub const BALANCE_OF_SELECTOR: &str = "70a08231";

/// Build `balanceOf` call data: selector followed by the wallet address
/// left-padded to a 32-byte word
pub fn balance_of_calldata(wallet_address: &str) -> Result<String, WidgetError> {
    let digits = wallet_address
        .strip_prefix("0x")
        .or_else(|| wallet_address.strip_prefix("0X"))
        .unwrap_or(wallet_address);

    let bytes = hex::decode(digits)
        .map_err(|e| WidgetError::Configuration(format!("Invalid wallet address '{}': {}", wallet_address, e)))?;

    if bytes.len() != 20 {
        return Err(WidgetError::Configuration(format!(
            "Wallet address must be 20 bytes, got {}",
            bytes.len()
        )));
    }

    Ok(format!("0x{}{:0>64}", BALANCE_OF_SELECTOR, hex::encode(bytes)))
}

/// Decode a hex-encoded uint256 into a decimal token amount
pub fn decode_balance(result_hex: &str, decimals: u32) -> Result<f64, WidgetError> {
    let digits = result_hex.strip_prefix("0x").unwrap_or(result_hex);
    if digits.is_empty() {
        return Ok(0.0);
    }

    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };
    let bytes = hex::decode(&padded)
        .map_err(|e| WidgetError::Rpc(format!("Malformed balance result '{}': {}", result_hex, e)))?;

    let raw = bytes.iter().fold(0.0_f64, |acc, b| acc * 256.0 + *b as f64);
    Ok(raw / 10_f64.powi(decimals as i32))
}

/// Read the token balance held by `wallet_address`
///
/// An empty wallet address returns 0 without touching the network.
/// Unknown chains and malformed wallets fail before any RPC call is made.
pub async fn fetch_balance(
    rpc: &dyn RpcTransport,
    wallet_address: &str,
    token_address: &str,
    chain: &str,
    decimals: u32,
) -> Result<f64, WidgetError> {
    if wallet_address.is_empty() {
        debug!("No wallet configured, skipping balance lookup");
        return Ok(0.0);
    }

    let rpc_url = rpc_url_for(chain)?;
    let call = CallObject {
        to: token_address.to_string(),
        data: balance_of_calldata(wallet_address)?,
    };

    let response = rpc.eth_call(rpc_url, &call).await?;

    if let Some(error) = response.error {
        return Err(WidgetError::Rpc(error.message));
    }

    let result = response
        .result
        .ok_or_else(|| WidgetError::Rpc("eth_call returned neither result nor error".to_string()))?;

    let balance = decode_balance(&result, decimals)?;
    info!("👛 Balance for {} on {}: {}", wallet_address, chain, balance);
    Ok(balance)
}
