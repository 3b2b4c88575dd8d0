//! Snapshot record produced once per render cycle

use serde::{Deserialize, Serialize};

use super::chart::PriceHistory;

/// Immutable view of one token's price and balance state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub symbol: String,
    pub current_price: f64,
    pub price_change: f64,
    pub percent_change: f64,
    pub price_history: PriceHistory,
    pub balance: f64,
    pub total_value: f64,
    /// Unix millis
    pub last_updated: i64,
}

impl Snapshot {
    pub fn is_up(&self) -> bool {
        self.price_change >= 0.0
    }
}
