use super::api_server::{self, AlgoState};
use super::timer::{AlgorithmRunner, TimerAlgorithm};
use crate::app_config::AppConfig;
use crate::config;
use crate::utility::timing::Timer;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Timer algorithm command handler
pub struct AlgoCommands;

impl AlgoCommands {
    /// Serve `/start_algo`, optionally triggering it once after startup
    pub async fn run_server(cfg: &AppConfig) -> Result<()> {
        Timer::section("Timer Algorithm Server");

        let algorithm = TimerAlgorithm::new(cfg.algo_run_duration, config::ALGO_TICK);
        println!(
            "{} Run duration: {}s",
            "ℹ".blue(),
            algorithm.run_duration().as_secs()
        );

        let runner = Arc::new(AlgorithmRunner::new(algorithm));
        let app = api_server::algo_routes(AlgoState::new(runner));

        let listener = api_server::bind(cfg.algo_port).await?;
        let addr = listener.local_addr()?;
        info!(%addr, "Algorithm API listening");
        println!("🚀 Algorithm API running on http://{}", addr);
        println!("📋 Available endpoints:");
        println!("   POST /start_algo");
        println!();

        let server = tokio::spawn(api_server::serve(listener, app));

        if cfg.algo_self_trigger {
            tokio::time::sleep(cfg.algo_trigger_delay).await;
            let url = format!("http://{}/start_algo", addr);
            match Self::trigger_start(&url).await {
                Ok(body) => println!("{} Start Response: {}", "✓".green(), body),
                Err(e) => {
                    error!(error = %e, "Request failed");
                    println!("{} Request failed: {}", "✗".red(), e);
                }
            }
        }

        server.await.context("Server task failed")?
    }

    /// POST to a running `/start_algo` endpoint and return its JSON body
    pub async fn trigger_start(url: &str) -> Result<Value> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        let body = client
            .post(url)
            .send()
            .await
            .context("Request send failed")?
            .json::<Value>()
            .await
            .context("Failed to parse response")?;

        Ok(body)
    }
}
