use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar as fetched from the provider
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

/// One row read back from a saved CSV file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceRow {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Open")]
    pub open: Option<f64>,

    #[serde(rename = "High")]
    pub high: Option<f64>,

    #[serde(rename = "Low")]
    pub low: Option<f64>,

    #[serde(rename = "Close")]
    pub close: Option<f64>,

    #[serde(rename = "Adj Close", default)]
    pub adj_close: Option<f64>,

    #[serde(rename = "Volume")]
    pub volume: Option<f64>,
}

/// Row shape returned by `GET /data/{ticker}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedRow {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Open")]
    pub open: String,

    #[serde(rename = "High")]
    pub high: String,

    #[serde(rename = "Low")]
    pub low: String,

    #[serde(rename = "Close")]
    pub close: String,

    #[serde(rename = "Volume")]
    pub volume: i64,
}

/// Outcome of one ticker in a fetch run
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Saved { ticker: String, rows: usize },
    NoData { ticker: String },
    Failed { ticker: String, error: String },
}
