use std::collections::HashMap;
use lazy_static::lazy_static;

use crate::utils::errors::WidgetError;

lazy_static! {
    // Chain identifier (lowercase) -> public RPC endpoint
    static ref CHAIN_RPC_ENDPOINTS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("arbitrum", "https://arb1.arbitrum.io/rpc");
        m.insert("ethereum", "https://ethereum.publicnode.com");
        m.insert("polygon", "https://polygon-rpc.com");
        m.insert("optimism", "https://mainnet.optimism.io");
        m.insert("avalanche", "https://api.avax.network/ext/bc/C/rpc");
        m.insert("bsc", "https://bsc-dataseed.binance.org");
        m.insert("base", "https://mainnet.base.org");
        m.insert("mode", "https://mainnet.mode.network");
        m
    };
}

/// Look up the RPC URL for a chain (case-insensitive)
pub fn rpc_url_for(chain: &str) -> Result<&'static str, WidgetError> {
    CHAIN_RPC_ENDPOINTS
        .get(chain.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| WidgetError::Configuration(format!("No RPC URL found for chain: {}", chain)))
}

/// All chain identifiers with a known endpoint, sorted
pub fn supported_chains() -> Vec<&'static str> {
    let mut chains: Vec<&'static str> = CHAIN_RPC_ENDPOINTS.keys().copied().collect();
    chains.sort_unstable();
    chains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(rpc_url_for("Arbitrum").unwrap(), "https://arb1.arbitrum.io/rpc");
        assert_eq!(rpc_url_for("BSC").unwrap(), "https://bsc-dataseed.binance.org");
    }

    #[test]
    fn test_unknown_chain_is_configuration_error() {
        match rpc_url_for("solana") {
            Err(WidgetError::Configuration(msg)) => assert!(msg.contains("solana")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_supported_chains() {
        let chains = supported_chains();
        assert_eq!(chains.len(), 8);
        assert_eq!(chains.first(), Some(&"arbitrum"));
    }
}
