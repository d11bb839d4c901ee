use crate::config;
use anyhow::{Result, bail};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

pub const MODES: &[&str] = &["filter", "historical", "fetch-historical", "algo"];

/// Application configuration handler
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: String,
    pub option_chain_input: PathBuf,
    pub option_chain_output: PathBuf,
    pub data_dir: PathBuf,
    pub hist_port: u16,
    pub algo_port: u16,
    pub algo_run_duration: Duration,
    pub algo_self_trigger: bool,
    pub algo_trigger_delay: Duration,
}

impl AppConfig {
    /// Create new configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            mode: config::get_execution_mode(),
            option_chain_input: PathBuf::from(config::get_option_chain_input()),
            option_chain_output: PathBuf::from(config::get_option_chain_output()),
            data_dir: PathBuf::from(config::get_data_dir()),
            hist_port: config::get_port("HIST_PORT", config::DEFAULT_HIST_PORT),
            algo_port: config::get_port("ALGO_PORT", config::DEFAULT_ALGO_PORT),
            algo_run_duration: Duration::from_secs(config::get_secs(
                "ALGO_RUN_SECS",
                config::DEFAULT_ALGO_RUN_SECS,
            )),
            algo_self_trigger: config::is_self_trigger_enabled(),
            algo_trigger_delay: Duration::from_secs(config::get_secs(
                "ALGO_TRIGGER_DELAY_SECS",
                config::DEFAULT_ALGO_TRIGGER_DELAY_SECS,
            )),
        }
    }

    /// Print the selected mode and the paths/ports it will use
    pub fn log_config(&self) {
        println!("{} Mode: {}", "→".cyan(), self.mode.yellow());
        match self.mode.as_str() {
            "filter" => {
                println!("{} Input: {}", "→".cyan(), self.option_chain_input.display());
                println!("{} Output: {}", "→".cyan(), self.option_chain_output.display());
            }
            "historical" | "fetch-historical" => {
                println!("{} Data dir: {}", "→".cyan(), self.data_dir.display());
                if self.mode == "historical" {
                    println!("{} Port: {}", "→".cyan(), self.hist_port);
                }
            }
            "algo" => {
                println!("{} Port: {}", "→".cyan(), self.algo_port);
                println!("{} Run duration: {}s", "→".cyan(), self.algo_run_duration.as_secs());
            }
            _ => {}
        }
        println!();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !MODES.contains(&self.mode.as_str()) {
            bail!(
                "Invalid mode '{}'. Use one of: {}",
                self.mode,
                MODES.join(", ")
            );
        }
        if self.mode == "algo" && self.algo_run_duration.is_zero() {
            bail!("ALGO_RUN_SECS must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AppConfig {
        AppConfig {
            mode: "filter".to_string(),
            option_chain_input: PathBuf::from(config::DEFAULT_OPTION_CHAIN_INPUT),
            option_chain_output: PathBuf::from(config::DEFAULT_OPTION_CHAIN_OUTPUT),
            data_dir: PathBuf::from(config::DEFAULT_DATA_DIR),
            hist_port: config::DEFAULT_HIST_PORT,
            algo_port: config::DEFAULT_ALGO_PORT,
            algo_run_duration: Duration::from_secs(config::DEFAULT_ALGO_RUN_SECS),
            algo_self_trigger: false,
            algo_trigger_delay: Duration::from_secs(config::DEFAULT_ALGO_TRIGGER_DELAY_SECS),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_mode() {
        let mut cfg = base();
        assert!(cfg.validate().is_ok());

        cfg.mode = "batch".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_run_duration() {
        let mut cfg = base();
        cfg.mode = "algo".to_string();
        cfg.algo_run_duration = Duration::ZERO;
        assert!(cfg.validate().is_err());
    }
}
