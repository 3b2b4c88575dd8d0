pub mod client;
pub mod models;

pub use client::{CoinsClient, PriceOracle};
pub use models::{BatchHistoricalResponse, CoinHistory, HistoricalPrice};
