use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashboard_core::defaults::DashboardDefaults;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const APP_DIR: &str = ".summary-dashboard";
const DEFAULTS_FILE: &str = "defaults.json";

fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.summary-dashboard/logs/` exists.
pub fn ensure_directories() -> anyhow::Result<()> {
    std::fs::create_dir_all(app_dir().join("logs"))?;
    Ok(())
}

/// Log file used by the dashboard view when `--log-file` is not given.
pub fn default_log_file() -> PathBuf {
    app_dir().join("logs").join("summary-dashboard.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With a `log_file` every event is appended there without ANSI colours,
/// which keeps the terminal free for the TUI. Otherwise events go to stderr.
/// Unknown levels fall back to `info`.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = log_file.is_none().then(|| {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

// ── Defaults discovery ─────────────────────────────────────────────────────────

/// `~/.summary-dashboard/defaults.json`, if present.
pub fn discover_defaults_file() -> Option<PathBuf> {
    let path = app_dir().join(DEFAULTS_FILE);
    path.is_file().then_some(path)
}

/// Resolve the chart and card defaults.
///
/// An explicit file must load. A discovered file that fails to load is
/// logged and replaced by the built-in set.
pub fn load_defaults(explicit: Option<&Path>) -> anyhow::Result<DashboardDefaults> {
    if let Some(path) = explicit {
        return Ok(DashboardDefaults::load_from(path)?);
    }

    let Some(path) = discover_defaults_file() else {
        return Ok(DashboardDefaults::builtin());
    };

    Ok(DashboardDefaults::load_from(&path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable defaults file");
        DashboardDefaults::builtin()
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
