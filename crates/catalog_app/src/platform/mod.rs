mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod output;
mod ui;

use anyhow::Result;
use clap::Parser;

pub fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = config::AppConfig::load(cli.config.as_deref())?.with_overrides(&cli);
    logging::initialize(config.log, config.log_level);
    app::run_app(&config)
}
