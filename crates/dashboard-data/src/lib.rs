//! Data ingestion layer for the summary dashboard.
//!
//! Fetches the remote summary payload and reshapes it into chart-ready
//! series.

pub mod client;
pub mod normalizer;

pub use dashboard_core as core;
pub use normalizer::normalize;
