use anyhow::Result;
use colored::Colorize;
use nse_index_tools::AppConfig;
use nse_index_tools::algo::AlgoCommands;
use nse_index_tools::historical::HistoricalCommands;
use nse_index_tools::logging;
use nse_index_tools::option_chain::OptionChainCommands;
use std::path::Path;

fn print_usage() {
    eprintln!("Set APP_MODE environment variable to control execution mode");
    eprintln!("Examples:");
    eprintln!("  APP_MODE=filter OPTION_CHAIN_INPUT=data/NIFTYoption_chain.json cargo run");
    eprintln!("  APP_MODE=fetch-historical HIST_DATA_DIR=data cargo run");
    eprintln!("  APP_MODE=historical HIST_PORT=5000 cargo run   # Fetch then serve /data/{{ticker}}");
    eprintln!("  APP_MODE=algo ALGO_PORT=5000 ALGO_SELF_TRIGGER=1 cargo run");
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging(Path::new(logging::LOG_DIR))?;

    let cfg = AppConfig::from_env();
    if let Err(e) = cfg.validate() {
        eprintln!("{} {}", "✗".red(), e);
        print_usage();
        std::process::exit(1);
    }
    cfg.log_config();

    match cfg.mode.as_str() {
        "filter" => OptionChainCommands::run_filter(&cfg)?,
        "fetch-historical" => HistoricalCommands::run_fetch(&cfg).await?,
        "historical" => HistoricalCommands::run_server(&cfg).await?,
        "algo" => AlgoCommands::run_server(&cfg).await?,
        _ => unreachable!("mode validated above"),
    }

    Ok(())
}
