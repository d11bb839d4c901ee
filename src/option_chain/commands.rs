use super::io::filter_file;
use crate::app_config::AppConfig;
use crate::utility::timing::{Timer, timed};
use anyhow::{Context, Result};
use colored::Colorize;

/// Option chain command handler
pub struct OptionChainCommands;

impl OptionChainCommands {
    /// Keep only the last trading date of every instrument in the configured snapshot
    pub fn run_filter(cfg: &AppConfig) -> Result<()> {
        Timer::section("Option Chain Last-Date Filter");

        let input = &cfg.option_chain_input;
        let output = &cfg.option_chain_output;

        println!("{} Reading {}", "→".cyan(), input.display().to_string().yellow());

        let summary = timed("option chain filter", || filter_file(input, output))
            .with_context(|| format!("Failed to filter {}", input.display()))?;

        println!("{} Instruments in: {}", "ℹ".blue(), summary.instruments_in);
        println!("{} Kept: {}", "✓".green(), summary.instruments_kept);
        if summary.instruments_skipped > 0 {
            println!(
                "{} Skipped (no dated observations): {}",
                "ℹ".blue(),
                summary.instruments_skipped
            );
        }
        println!(
            "{} Filtered data has been saved to {}",
            "✓".green(),
            output.display()
        );

        Ok(())
    }
}
