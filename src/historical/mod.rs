pub mod api_server;
pub mod commands;
pub mod csv_store;
pub mod models;
pub mod yahoo_client;

// Re-export commonly used items
pub use api_server::{HistoricalState, historical_routes};
pub use commands::HistoricalCommands;
pub use models::{DailyBar, FetchOutcome, FormattedRow, PriceRow};
pub use yahoo_client::YahooClient;
