use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};

/// Weekly summary endpoint queried when no `--url` is given.
pub const DEFAULT_SUMMARY_URL: &str = "http://ezcode.ddns.net:8090/api/lumsumday/summary/weekly";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for a remote sales summary endpoint
#[derive(Parser, Debug, Clone)]
#[command(
    name = "summary-dashboard",
    about = "Terminal dashboard for a remote sales summary endpoint",
    version
)]
pub struct Settings {
    /// Summary endpoint URL
    #[arg(long, env = "SUMMARY_URL", default_value = DEFAULT_SUMMARY_URL)]
    pub url: String,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "json"])]
    pub view: String,

    /// Refresh rate in seconds (0 fetches once)
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=3600))]
    pub refresh_rate: u32,

    /// Request timeout in seconds (1-300)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: u64,

    /// JSON file with default charts and statistic cards
    #[arg(long)]
    pub defaults_file: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings.url = settings.url.trim().to_string();

        settings
    }

    /// Reject values clap cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(DashboardError::Config("summary URL must not be empty".to_string()));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "summary URL must use http or https: {}",
                self.url
            )));
        }
        Ok(())
    }

    /// `true` when the dashboard should keep polling after the first fetch.
    pub fn is_periodic(&self) -> bool {
        self.refresh_rate > 0
    }

    /// Host (and port) part of the URL for display.
    pub fn endpoint_host(&self) -> &str {
        let rest = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        rest.split('/').next().unwrap_or(rest)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
