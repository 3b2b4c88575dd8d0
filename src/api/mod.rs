//! Network collaborators: the price oracle and chain RPC endpoints

pub mod error;
pub mod llama;
pub mod rpc;

pub use error::ApiError;
