//! Runtime orchestration layer for the summary dashboard.
//!
//! Drives the fetch lifecycle of a dashboard instance and derives the chart
//! state the UI renders.

pub mod chart_state;
pub mod orchestrator;

pub use dashboard_core as core;
pub use dashboard_data as data;
