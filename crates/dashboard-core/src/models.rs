use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic slot a numeric series is extracted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesSlot {
    /// Summed item quantities (`sumqty`, `qty`, ...).
    Quantity,
    /// Monetary totals (`sumamt`, `amount`, ...).
    Amount,
    /// Order or event counts (`ordercnt`, `count`, ...).
    Count,
}

impl SeriesSlot {
    /// All slots in output order.
    pub const ALL: [SeriesSlot; 3] = [SeriesSlot::Quantity, SeriesSlot::Amount, SeriesSlot::Count];

    /// Label used when no source key was detected for this slot.
    pub fn fallback_label(self) -> &'static str {
        match self {
            SeriesSlot::Quantity => "Sum Qty",
            SeriesSlot::Amount => "Sum Amount",
            SeriesSlot::Count => "Order Count",
        }
    }
}

impl fmt::Display for SeriesSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeriesSlot::Quantity => "quantity",
            SeriesSlot::Amount => "amount",
            SeriesSlot::Count => "count",
        };
        f.write_str(name)
    }
}

/// One numeric series extracted from a summary payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    /// Lower-cased source field the values were read from. Empty for a
    /// zero-filled placeholder.
    pub key: String,
    /// Human-readable series name.
    pub label: String,
    /// One value per bundle label.
    pub values: Vec<f64>,
    /// Slot that produced the series.
    pub slot: SeriesSlot,
}

impl NormalizedSeries {
    /// Zero-filled stand-in for a slot that matched nothing.
    pub fn placeholder(slot: SeriesSlot, len: usize) -> Self {
        Self {
            key: String::new(),
            label: slot.fallback_label().to_string(),
            values: vec![0.0; len],
            slot,
        }
    }

    /// `true` when the series was read from a real source field.
    pub fn is_matched(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Chart-ready output of the normalizer.
///
/// `series` only contains slots that matched a source field, in slot order
/// (quantity, amount, count). Every series has exactly `labels.len()` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartBundle {
    pub labels: Vec<String>,
    pub series: Vec<NormalizedSeries>,
}

impl ChartBundle {
    /// `true` when the payload contained no records.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The matched series for `slot`, if any.
    pub fn series(&self, slot: SeriesSlot) -> Option<&NormalizedSeries> {
        self.series.iter().find(|s| s.slot == slot)
    }

    /// Whether any record carried a field for `slot`.
    pub fn has_match(&self, slot: SeriesSlot) -> bool {
        self.series(slot).is_some()
    }

    /// Series shown in the bar chart: quantity, else amount.
    pub fn primary(&self) -> Option<&NormalizedSeries> {
        self.series(SeriesSlot::Quantity)
            .or_else(|| self.series(SeriesSlot::Amount))
    }

    /// Series shown in the sales line chart: amount, else quantity.
    ///
    /// When quantity is also unmatched the result is its zero-filled
    /// placeholder.
    pub fn sales(&self) -> NormalizedSeries {
        self.chained(SeriesSlot::Amount, SeriesSlot::Quantity)
    }

    /// Series shown in the tasks line chart: count, else quantity.
    pub fn tasks(&self) -> NormalizedSeries {
        self.chained(SeriesSlot::Count, SeriesSlot::Quantity)
    }

    fn chained(&self, preferred: SeriesSlot, fallback: SeriesSlot) -> NormalizedSeries {
        self.series(preferred)
            .or_else(|| self.series(fallback))
            .cloned()
            .unwrap_or_else(|| NormalizedSeries::placeholder(fallback, self.labels.len()))
    }
}

/// Props for a single chart wrapper: x labels plus one named dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    /// Dataset name shown in the chart legend.
    pub label: String,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn new(labels: &[&str], label: &str, values: &[f64]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            label: label.to_string(),
            values: values.to_vec(),
        }
    }

    /// Pair `series` with the bundle's labels.
    pub fn from_series(labels: &[String], series: &NormalizedSeries) -> Self {
        Self {
            labels: labels.to_vec(),
            label: series.label.clone(),
            values: series.values.clone(),
        }
    }

    /// Largest finite value, never below `0.0`.
    pub fn max_value(&self) -> f64 {
        self.finite_values().fold(0.0, f64::max)
    }

    /// Smallest finite value, never above `0.0`.
    pub fn min_value(&self) -> f64 {
        self.finite_values().fold(0.0, f64::min)
    }

    fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied().filter(|v| v.is_finite())
    }
}

/// Everything the dashboard draws in its chart row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCharts {
    /// Daily quantity bar chart.
    pub bar: ChartData,
    /// Sales line chart.
    pub sales: ChartData,
    /// Completed-tasks line chart.
    pub tasks: ChartData,
}

/// Colour intent of a statistic card's change line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Error,
}

/// Change indicator shown under a card's headline figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardChange {
    /// e.g. `"+55%"`. May be empty.
    #[serde(default)]
    pub amount: String,
    /// e.g. `"than last week"`.
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub tone: Tone,
}

/// Static statistic card rendered above the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    /// Short glyph drawn before the title.
    #[serde(default)]
    pub icon: String,
    /// Headline figure, already formatted.
    pub count: String,
    pub change: CardChange,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
