use std::time::Duration;

// -----------------------------------------------
// OPTION CHAIN FILTER
// -----------------------------------------------
pub const DEFAULT_OPTION_CHAIN_INPUT: &str = "data/NIFTYoption_chain.json";
pub const DEFAULT_OPTION_CHAIN_OUTPUT: &str = "data/NIFTYoption_chain_filtered.json";

// -----------------------------------------------
// HISTORICAL INDEX DATA
// -----------------------------------------------
pub const DEFAULT_DATA_DIR: &str = "data";

/// A tracked index and the CSV file its history is saved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexTicker {
    pub symbol: &'static str,
    pub csv_file: &'static str,
    pub label: &'static str,
}

pub const INDEX_TICKERS: &[IndexTicker] = &[
    IndexTicker {
        symbol: "^NSEI",
        csv_file: "nifty_historical_data.csv",
        label: "Nifty Index Data",
    },
    IndexTicker {
        symbol: "^NSEBANK",
        csv_file: "banknifty_historical_data.csv",
        label: "Bank Nifty Data",
    },
    IndexTicker {
        symbol: "NIFTY_FIN_SERVICE.NS",
        csv_file: "finnifty_historical_data.csv",
        label: "Fin Nifty Data",
    },
];

/// First day requested from the provider; it clamps to the listing date
pub const HISTORY_START: &str = "1900-01-01";

pub const YAHOO_CHART_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

pub fn yahoo_chart_url(ticker: &str, period1: i64, period2: i64) -> String {
    format!(
        "{}/{}?period1={}&period2={}&interval=1d&events=history&includeAdjustedClose=true",
        YAHOO_CHART_URL,
        urlencoding::encode(ticker),
        period1,
        period2
    )
}

pub fn find_index_ticker(symbol: &str) -> Option<&'static IndexTicker> {
    INDEX_TICKERS.iter().find(|ticker| ticker.symbol == symbol)
}

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                               AppleWebKit/537.36 (KHTML, like Gecko) \
                               Chrome/131.0.0.0 Safari/537.36";

pub const ACCEPT_LANGUAGES: &[&str] = &[
    "en-US,en;q=0.9",
    "en-GB,en;q=0.8",
    "en-IN,en;q=0.9",
];

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// -----------------------------------------------
// RETRY CONFIG
// -----------------------------------------------
pub const RETRY_BASE_DELAY_MS: u64 = 200;
pub const RETRY_FACTOR: u64 = 2;
pub const RETRY_MAX_DELAY_SECS: u64 = 3;
pub const RETRY_MAX_ATTEMPTS: usize = 3;

// -----------------------------------------------
// TIMER ALGORITHM
// -----------------------------------------------
pub const DEFAULT_ALGO_RUN_SECS: u64 = 600;
pub const ALGO_TICK: Duration = Duration::from_secs(1);
pub const DEFAULT_ALGO_TRIGGER_DELAY_SECS: u64 = 5;

// -----------------------------------------------
// SERVERS
// -----------------------------------------------
pub const DEFAULT_HIST_PORT: u16 = 5000;
pub const DEFAULT_ALGO_PORT: u16 = 5000;
pub const SERVER_HOST: &str = "127.0.0.1";

// -----------------------------------------------
// RUNTIME CONFIGURATION
// -----------------------------------------------

/// Get the execution mode from environment or default to filter
pub fn get_execution_mode() -> String {
    std::env::var("APP_MODE").unwrap_or_else(|_| "filter".to_string())
}

pub fn get_option_chain_input() -> String {
    std::env::var("OPTION_CHAIN_INPUT").unwrap_or_else(|_| DEFAULT_OPTION_CHAIN_INPUT.to_string())
}

pub fn get_option_chain_output() -> String {
    std::env::var("OPTION_CHAIN_OUTPUT")
        .unwrap_or_else(|_| DEFAULT_OPTION_CHAIN_OUTPUT.to_string())
}

pub fn get_data_dir() -> String {
    std::env::var("HIST_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string())
}

pub fn get_port(var: &str, default: u16) -> u16 {
    std::env::var(var)
        .ok()
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(default)
}

pub fn get_secs(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

/// Whether the algo command should post to its own /start_algo after startup
pub fn is_self_trigger_enabled() -> bool {
    std::env::var("ALGO_SELF_TRIGGER")
        .map(|val| !matches!(val.as_str(), "" | "0" | "false"))
        .unwrap_or(false)
}
