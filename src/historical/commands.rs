use super::api_server;
use super::csv_store;
use super::models::{DailyBar, FetchOutcome};
use super::yahoo_client::YahooClient;
use crate::app_config::AppConfig;
use crate::config::{self, IndexTicker};
use crate::utility::timing::{Timer, timed_async};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use colored::Colorize;
use futures::future::join_all;
use std::path::Path;
use tracing::{error, info, warn};

/// Historical index data command handler
pub struct HistoricalCommands;

impl HistoricalCommands {
    /// Download every tracked index and save it as CSV under `data_dir`.
    /// A failing ticker is reported and does not stop the others.
    pub async fn fetch_and_save_all(
        client: &YahooClient,
        data_dir: &Path,
    ) -> Result<Vec<FetchOutcome>> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        let start = NaiveDate::parse_from_str(config::HISTORY_START, "%Y-%m-%d")
            .context("Invalid history start date")?;
        let today = Local::now().date_naive();

        let fetches = config::INDEX_TICKERS.iter().map(|ticker| async move {
            info!(ticker = ticker.symbol, "Fetching data");
            let result = client.fetch_daily_bars(ticker.symbol, start, today).await;
            (ticker, result)
        });

        let outcomes = join_all(fetches)
            .await
            .into_iter()
            .map(|(ticker, result)| Self::save(ticker, result, data_dir))
            .collect();

        Ok(outcomes)
    }

    fn save(
        ticker: &IndexTicker,
        result: Result<Vec<DailyBar>>,
        data_dir: &Path,
    ) -> FetchOutcome {
        let symbol = ticker.symbol.to_string();

        let bars = match result {
            Ok(bars) => bars,
            Err(e) => {
                error!(ticker = ticker.symbol, error = %e, "Failed to fetch data");
                return FetchOutcome::Failed {
                    ticker: symbol,
                    error: e.to_string(),
                };
            }
        };

        if bars.is_empty() {
            warn!(ticker = ticker.symbol, "No data found");
            return FetchOutcome::NoData { ticker: symbol };
        }

        let path = data_dir.join(ticker.csv_file);
        match csv_store::write_bars(&path, &bars) {
            Ok(()) => {
                info!(ticker = ticker.symbol, rows = bars.len(), path = %path.display(), "Data saved as CSV");
                FetchOutcome::Saved {
                    ticker: symbol,
                    rows: bars.len(),
                }
            }
            Err(e) => {
                error!(ticker = ticker.symbol, error = %e, "Failed to save data");
                FetchOutcome::Failed {
                    ticker: symbol,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Fetch all indices and print a summary
    pub async fn run_fetch(cfg: &AppConfig) -> Result<()> {
        Timer::section("NSE Historical Data Fetch");

        let client = YahooClient::new()?;
        let outcomes = timed_async("historical fetch", || {
            Self::fetch_and_save_all(&client, &cfg.data_dir)
        })
        .await?;

        for outcome in &outcomes {
            match outcome {
                FetchOutcome::Saved { ticker, rows } => {
                    println!("{} {} → {} rows", "✓".green(), ticker.yellow(), rows)
                }
                FetchOutcome::NoData { ticker } => {
                    println!("{} {} → no data found", "⚠".yellow(), ticker.yellow())
                }
                FetchOutcome::Failed { ticker, error } => println!(
                    "{} {} → {}",
                    "✗".red(),
                    ticker.yellow(),
                    error.chars().take(80).collect::<String>()
                ),
            }
        }
        println!();

        Ok(())
    }

    /// Fetch all indices, then serve them
    pub async fn run_server(cfg: &AppConfig) -> Result<()> {
        Self::run_fetch(cfg).await?;
        println!("{}", "Server is running. Access the API endpoints to view the data.".cyan());
        api_server::start_server(cfg.hist_port, cfg.data_dir.clone()).await
    }
}
