pub mod algo;
pub mod app_config;
pub mod config;
pub mod error;
pub mod historical;
pub mod logging;
pub mod option_chain;
pub mod utility;

// Re-exports for convenience
pub use app_config::AppConfig;
pub use error::{FilterError, FilterResult};
pub use option_chain::{FilteredDocument, OptionChainDocument, extract_last_trading_date};
