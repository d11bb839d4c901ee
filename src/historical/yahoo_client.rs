use super::models::DailyBar;
use crate::config;
use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDate};
use rand::{seq::SliceRandom, thread_rng};
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, warn};

// -----------------------------------------------
// CHART API RESPONSE
// -----------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

// -----------------------------------------------
// CLIENT
// -----------------------------------------------
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
        })
    }

    /// Daily bars for `ticker` from `start` up to, not including, `end`.
    /// An empty vec means the provider had nothing for the range.
    pub async fn fetch_daily_bars(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let period1 = midnight_timestamp(start)?;
        let period2 = midnight_timestamp(end)?;
        let url = config::yahoo_chart_url(ticker, period1, period2);
        debug!(ticker, url = %url, "Requesting chart");

        let text = self.fetch_text(&url).await?;
        parse_chart_response(&text)
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let backoff = ExponentialBackoff::from_millis(config::RETRY_BASE_DELAY_MS)
            .factor(config::RETRY_FACTOR)
            .max_delay(Duration::from_secs(config::RETRY_MAX_DELAY_SECS))
            .take(config::RETRY_MAX_ATTEMPTS);

        Retry::spawn(backoff, || async {
            let res = self
                .client
                .get(url)
                .send()
                .await
                .context("Request send failed")?;

            let status = res.status();

            // 404 carries a chart.error body worth reporting
            if status.is_success() || status == StatusCode::NOT_FOUND {
                res.text().await.context("Failed to read body")
            } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                warn!(%status, "Retryable error from chart API");
                bail!("Retryable error: {}", status)
            } else {
                let body = res.text().await.unwrap_or_default();
                let preview: String = body.chars().take(200).collect();
                bail!("Client error {}: {}", status, preview)
            }
        })
        .await
    }
}

fn midnight_timestamp(date: NaiveDate) -> Result<i64> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| anyhow!("Invalid date: {}", date))
}

/// Parse a v8 chart body into daily bars.
///
/// Bars where every OHLCV value is null (holidays) are dropped. Timestamps are
/// shifted by the exchange GMT offset so each bar lands on its local trading day.
pub fn parse_chart_response(text: &str) -> Result<Vec<DailyBar>> {
    let resp: ChartResponse =
        serde_json::from_str(text).context("Failed to parse chart response")?;

    let Some(result) = resp.chart.result else {
        return match resp.chart.error {
            Some(err) if err.code == "Not Found" => Ok(Vec::new()),
            Some(err) => Err(anyhow!("Chart error {}: {}", err.code, err.description)),
            None => Err(anyhow!("Empty chart result with no error")),
        };
    };

    let Some(data) = result.into_iter().next() else {
        return Ok(Vec::new());
    };

    let Some(timestamps) = data.timestamp else {
        return Ok(Vec::new());
    };

    let offset = data.meta.map(|m| m.gmtoffset).unwrap_or(0);
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let adj_closes = data
        .indicators
        .adjclose
        .and_then(|v| v.into_iter().next())
        .map(|a| a.adjclose);

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = DateTime::from_timestamp(ts + offset, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| anyhow!("Invalid timestamp: {}", ts))?;

        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten();

        if open.is_none() && high.is_none() && low.is_none() && close.is_none() && volume.is_none()
        {
            continue;
        }

        bars.push(DailyBar {
            date,
            open,
            high,
            low,
            close,
            adj_close: adj_closes
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten()),
            volume,
        });
    }

    Ok(bars)
}

// -----------------------------------------------
// HTTP CLIENT BUILDER
// -----------------------------------------------
fn build_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();

    let lang = config::ACCEPT_LANGUAGES
        .choose(&mut thread_rng())
        .copied()
        .unwrap_or("en-US,en;q=0.9");
    headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_str(lang)?);
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    Client::builder()
        .default_headers(headers)
        .user_agent(config::USER_AGENT)
        .timeout(config::HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}
