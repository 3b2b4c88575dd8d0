pub mod balance_service;
pub mod cache_service;
pub mod chart_service;
pub mod price_history_service;
pub mod snapshot_service;
