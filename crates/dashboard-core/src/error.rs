use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the summary dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The summary endpoint answered with a non-2xx status code.
    #[error("Summary endpoint returned status {status}")]
    Status { status: u16 },

    /// The request did not complete within the configured timeout.
    #[error("Request to summary endpoint timed out")]
    Timeout,

    /// The summary endpoint could not be reached.
    #[error("Summary endpoint unavailable: {0}")]
    Unavailable(String),

    /// Any other transport-level failure.
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body was not valid JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// A defaults file could not be opened or read from disk.
    #[error("Failed to read defaults file {path}: {source}")]
    DefaultsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashboardError {
    /// `true` for failures that originate from the network fetch rather than
    /// from local configuration.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Status { .. }
                | Self::Timeout
                | Self::Unavailable(_)
                | Self::Request(_)
                | Self::Decode(_)
        )
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
