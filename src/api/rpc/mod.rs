pub mod client;
pub mod models;

pub use client::{JsonRpcClient, RpcTransport};
pub use models::{CallObject, JsonRpcError, JsonRpcResponse};
