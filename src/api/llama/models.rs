use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::models::PricePoint;

/// Response from the batched historical price endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchHistoricalResponse {
    #[serde(default)]
    pub coins: HashMap<String, CoinHistory>,
}

impl BatchHistoricalResponse {
    /// Find a coin entry by its `<chain>:<address>` key.
    /// Falls back to an ASCII case-insensitive match since the oracle
    /// may echo addresses in a different case than requested.
    pub fn coin(&self, key: &str) -> Option<&CoinHistory> {
        self.coins.get(key).or_else(|| {
            self.coins
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }
}

/// Price history for a single coin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinHistory {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub prices: Vec<HistoricalPrice>,
}

/// One sample returned by the oracle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    pub timestamp: i64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl From<&HistoricalPrice> for PricePoint {
    fn from(p: &HistoricalPrice) -> Self {
        PricePoint {
            timestamp: p.timestamp,
            price: p.price,
        }
    }
}
