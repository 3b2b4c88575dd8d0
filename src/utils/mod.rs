pub mod chains;
pub mod errors;

pub use chains::rpc_url_for;
pub use errors::{CacheError, WidgetError};
