//! Derivation of displayed chart state from a normalized bundle.

use dashboard_core::models::{ChartBundle, ChartData, DashboardCharts};

/// Which parts of [`DashboardCharts`] a bundle replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartChanges {
    pub bar: bool,
    /// Sales and tasks always change together.
    pub lines: bool,
}

impl ChartChanges {
    pub fn any(&self) -> bool {
        self.bar || self.lines
    }
}

/// Apply `bundle` to `charts` in place.
///
/// - An empty bundle changes nothing.
/// - The bar chart takes the primary series (quantity, else amount) when
///   there is one.
/// - Both line charts are replaced as soon as any slot matched, using the
///   fallback-chained sales and tasks series.
pub fn apply_bundle(charts: &mut DashboardCharts, bundle: &ChartBundle) -> ChartChanges {
    let mut changes = ChartChanges::default();

    if bundle.is_empty() {
        return changes;
    }

    if let Some(primary) = bundle.primary() {
        charts.bar = ChartData::from_series(&bundle.labels, primary);
        changes.bar = true;
    }

    if !bundle.series.is_empty() {
        charts.sales = ChartData::from_series(&bundle.labels, &bundle.sales());
        charts.tasks = ChartData::from_series(&bundle.labels, &bundle.tasks());
        changes.lines = true;
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::defaults::DashboardDefaults;
    use dashboard_data::normalize;
    use serde_json::json;

    fn defaults() -> DashboardCharts {
        DashboardDefaults::builtin().charts
    }

    #[test]
    fn test_empty_bundle_keeps_state() {
        let mut charts = defaults();
        let changes = apply_bundle(&mut charts, &ChartBundle::default());
        assert!(!changes.any());
        assert_eq!(charts, defaults());
    }

    #[test]
    fn test_unmatched_records_keep_state() {
        let mut charts = defaults();
        let changes = apply_bundle(&mut charts, &normalize(&json!([{ "foo": 1 }])));
        assert!(!changes.any());
        assert_eq!(charts, defaults());
    }

    #[test]
    fn test_quantity_only_feeds_every_chart() {
        let mut charts = defaults();
        let bundle = normalize(&json!([
            { "day": "Mon", "sumqty": 3 },
            { "day": "Tue", "sumqty": 9 }
        ]));

        let changes = apply_bundle(&mut charts, &bundle);
        assert_eq!(changes, ChartChanges { bar: true, lines: true });

        for chart in [&charts.bar, &charts.sales, &charts.tasks] {
            assert_eq!(chart.labels, vec!["Mon", "Tue"]);
            assert_eq!(chart.label, "Sum Qty");
            assert_eq!(chart.values, vec![3.0, 9.0]);
        }
    }

    #[test]
    fn test_each_slot_feeds_its_own_chart() {
        let mut charts = defaults();
        let bundle = normalize(&json!([
            { "Day": "Mon", "Qty": 1, "Amount": 250, "Orders": 4 }
        ]));

        apply_bundle(&mut charts, &bundle);
        assert_eq!(charts.bar.label, "Quantity");
        assert_eq!(charts.sales.label, "Amount");
        assert_eq!(charts.sales.values, vec![250.0]);
        assert_eq!(charts.tasks.label, "Orders");
        assert_eq!(charts.tasks.values, vec![4.0]);
    }

    #[test]
    fn test_count_only_keeps_bar_and_zero_fills_sales() {
        let mut charts = defaults();
        let bundle = normalize(&json!([{ "day": "Mon", "count": 5 }]));

        let changes = apply_bundle(&mut charts, &bundle);
        assert_eq!(changes, ChartChanges { bar: false, lines: true });
        assert_eq!(charts.bar, defaults().bar);
        assert_eq!(charts.sales.label, "Sum Qty");
        assert_eq!(charts.sales.values, vec![0.0]);
        assert_eq!(charts.tasks.values, vec![5.0]);
    }

    #[test]
    fn test_amount_only_uses_amount_for_bar() {
        let mut charts = defaults();
        let bundle = normalize(&json!([{ "period": "W1", "totalamount": "99.5" }]));

        apply_bundle(&mut charts, &bundle);
        assert_eq!(charts.bar.label, "Total Amount");
        assert_eq!(charts.bar.values, vec![99.5]);
        // tasks falls back to the zero-filled quantity placeholder
        assert_eq!(charts.tasks.values, vec![0.0]);
    }
}
