//! Shared building blocks for the summary dashboard.
//!
//! Holds the chart data model handed from the normalizer to the renderer,
//! the default chart configuration, formatting helpers, CLI settings and the
//! common error type.

pub mod defaults;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
