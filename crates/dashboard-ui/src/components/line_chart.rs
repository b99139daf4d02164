use dashboard_core::formatting::format_compact;
use dashboard_core::models::ChartData;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Titled single-dataset line chart card.
pub struct ReportsLineChart<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub chart: &'a ChartData,
    pub line_style: Style,
    pub theme: &'a Theme,
}

impl<'a> ReportsLineChart<'a> {
    pub fn new(
        title: &'a str,
        description: &'a str,
        chart: &'a ChartData,
        line_style: Style,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            description,
            chart,
            line_style,
            theme,
        }
    }

    fn block(&self) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.chart_border)
            .title(Span::styled(format!(" {} ", self.title), self.theme.chart_title))
            .title_bottom(Line::from(Span::styled(
                format!(" {} ", self.description),
                self.theme.dim,
            )))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let data = points(&self.chart.values);
        if self.chart.labels.is_empty() || data.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No data", self.theme.dim))
                    .alignment(Alignment::Center)
                    .block(self.block()),
                area,
            );
            return;
        }

        let [lo, hi] = y_bounds(self.chart);
        let x_max = (self.chart.labels.len().saturating_sub(1)).max(1) as f64;

        let dataset = Dataset::default()
            .name(self.chart.label.clone())
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.line_style)
            .data(&data);

        let x_axis = Axis::default()
            .style(self.theme.axis)
            .bounds([0.0, x_max])
            .labels(x_labels(&self.chart.labels));
        let y_axis = Axis::default()
            .style(self.theme.axis)
            .bounds([lo, hi])
            .labels(vec![format_compact(lo), format_compact(hi)]);

        let widget = Chart::new(vec![dataset])
            .block(self.block())
            .x_axis(x_axis)
            .y_axis(y_axis);

        frame.render_widget(widget, area);
    }
}

/// `(index, value)` pairs for every finite value.
pub fn points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

/// Y range anchored at zero, widened by one when flat.
pub fn y_bounds(chart: &ChartData) -> [f64; 2] {
    let lo = chart.min_value();
    let mut hi = chart.max_value();
    if hi <= lo {
        hi = lo + 1.0;
    }
    [lo, hi]
}

/// First, middle and last label; fewer when there are fewer labels.
pub fn x_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 | 2 => labels.to_vec(),
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
