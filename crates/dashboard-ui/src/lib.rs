//! Terminal UI layer for the summary dashboard.
//!
//! Provides the theme, header, statistic card and chart components, the
//! full-screen dashboard view, and the application event loop built on
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod themes;

pub use dashboard_core as core;
