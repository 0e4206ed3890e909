use std::path::PathBuf;

use clap::Parser;

use super::logging::{LogDestination, LogLevel};

/// Browse and search the character catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "catalog", version)]
pub struct Cli {
    /// RON config file. Defaults to `./catalog.ron` when present.
    #[arg(long, env = "CATALOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the catalog API, e.g. `https://rickandmortyapi.com/api/`.
    #[arg(long, env = "CATALOG_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Log verbosity; `debug` also records discarded stale responses.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}
