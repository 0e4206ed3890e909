use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use catalog_core::{CatalogEndpoint, DEFAULT_BASE_URL};
use catalog_engine::FetchSettings;
use serde::Deserialize;

use super::cli::Cli;
use super::logging::{LogDestination, LogLevel};

const DEFAULT_CONFIG_FILE: &str = "catalog.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log: LogDestination,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log: LogDestination::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl AppConfig {
    /// Loads `explicit`, or `./catalog.ron` if it exists, or the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load_or_default(&PathBuf::from(DEFAULT_CONFIG_FILE)),
        }
    }

    /// Like [`Self::load_from`], but a file that does not exist yields the defaults.
    fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load_from(path) {
            Err(err) if is_missing_file(&err) => Ok(Self::default()),
            other => other,
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        ron::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Command-line flags win over the file.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout) = cli.timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn endpoint(&self) -> Result<CatalogEndpoint> {
        CatalogEndpoint::new(&self.base_url)
            .with_context(|| format!("unusable base_url {:?}", self.base_url))
    }
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let file = write_config(r#"(base_url: "http://localhost:9000/api/", log: Both)"#);
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(
            config,
            AppConfig {
                base_url: "http://localhost:9000/api/".to_string(),
                log: LogDestination::Both,
                ..AppConfig::default()
            }
        );
        assert_eq!(config.fetch_settings().request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let file = write_config("(base_url: \"http://x/\", retries: 3)");
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        let err = AppConfig::load(Some(&missing)).unwrap_err();
        assert!(is_missing_file(&err));
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn present_default_file_is_still_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "(log_level: Debug, request_timeout_secs: 4)").unwrap();

        let config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.request_timeout_secs, 4);

        std::fs::write(&path, "(log_level: Loud)").unwrap();
        assert!(AppConfig::load_or_default(&path).is_err());
    }

    #[test]
    fn cli_flags_override_file_values() {
        let cli = Cli::parse_from([
            "catalog",
            "--timeout-secs",
            "2",
            "--log",
            "terminal",
            "--log-level",
            "trace",
        ]);
        let config = AppConfig::default().with_overrides(&cli);

        assert_eq!(config.request_timeout_secs, 2);
        assert_eq!(config.log, LogDestination::Terminal);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.fetch_settings().request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let config = AppConfig {
            base_url: "ftp://example.com/".to_string(),
            ..AppConfig::default()
        };
        assert!(config.endpoint().is_err());
        assert!(AppConfig::default().endpoint().is_ok());
    }
}
