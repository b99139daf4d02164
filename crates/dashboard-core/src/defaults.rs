//! Static chart data shown before the first fetch and after a failed one.
//!
//! [`DashboardDefaults`] is an explicit value handed to the orchestrator and
//! the UI; there is no global fallback state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::models::{CardChange, ChartData, DashboardCharts, StatCard, Tone};

/// Default charts and statistic cards for one dashboard instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDefaults {
    pub charts: DashboardCharts,
    #[serde(default = "builtin_cards")]
    pub cards: Vec<StatCard>,
}

impl Default for DashboardDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DashboardDefaults {
    /// Sample data compiled into the binary.
    pub fn builtin() -> Self {
        let months = ["Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

        Self {
            charts: DashboardCharts {
                bar: ChartData::new(
                    &["M", "T", "W", "T", "F", "S", "S"],
                    "Sales",
                    &[50.0, 20.0, 10.0, 22.0, 50.0, 10.0, 40.0],
                ),
                sales: ChartData::new(
                    &months,
                    "Mobile apps",
                    &[50.0, 40.0, 300.0, 320.0, 500.0, 350.0, 200.0, 230.0, 500.0],
                ),
                tasks: ChartData::new(
                    &months,
                    "Desktop apps",
                    &[50.0, 40.0, 300.0, 220.0, 500.0, 250.0, 400.0, 230.0, 500.0],
                ),
            },
            cards: builtin_cards(),
        }
    }

    /// Load defaults from a JSON file.
    ///
    /// `cards` may be omitted, in which case the built-in cards are used.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| DashboardError::DefaultsFile {
                path: path.to_path_buf(),
                source,
            })?;
        let defaults: Self = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded dashboard defaults");
        Ok(defaults)
    }
}

fn builtin_cards() -> Vec<StatCard> {
    let card = |icon: &str, title: &str, count: &str, amount: &str, label: &str| StatCard {
        title: title.to_string(),
        icon: icon.to_string(),
        count: count.to_string(),
        change: CardChange {
            amount: amount.to_string(),
            label: label.to_string(),
            tone: Tone::Success,
        },
    };

    vec![
        card("▣", "Bookings", "281", "+55%", "than last week"),
        card("▲", "Today's Users", "2,300", "+3%", "than last month"),
        card("$", "Revenue", "34k", "+1%", "than yesterday"),
        card("+", "Followers", "+91", "", "Just updated"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_charts_are_consistent() {
        let defaults = DashboardDefaults::builtin();
        for chart in [
            &defaults.charts.bar,
            &defaults.charts.sales,
            &defaults.charts.tasks,
        ] {
            assert_eq!(chart.labels.len(), chart.values.len(), "{}", chart.label);
        }
        assert_eq!(defaults.cards.len(), 4);
        assert_eq!(defaults.charts.bar.label, "Sales");
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("defaults.json");
        let mut custom = DashboardDefaults::builtin();
        custom.charts.bar.label = "Pallets".to_string();
        custom.cards.truncate(1);
        std::fs::write(&path, serde_json::to_string(&custom).unwrap()).unwrap();

        let loaded = DashboardDefaults::load_from(&path).expect("load");
        assert_eq!(loaded, custom);
    }

    #[test]
    fn test_load_from_file_without_cards_uses_builtin_cards() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("defaults.json");
        let charts = serde_json::to_value(DashboardDefaults::builtin().charts).unwrap();
        std::fs::write(&path, serde_json::json!({ "charts": charts }).to_string()).unwrap();

        let loaded = DashboardDefaults::load_from(&path).expect("load");
        assert_eq!(loaded.cards.len(), 4);
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let err = DashboardDefaults::load_from(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DashboardError::DefaultsFile { .. }));
    }

    #[test]
    fn test_load_from_invalid_json() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("defaults.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = DashboardDefaults::load_from(&path).unwrap_err();
        assert!(matches!(err, DashboardError::Json(_)));
    }
}
