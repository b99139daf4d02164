use dashboard_core::formatting::format_compact;
use dashboard_core::models::ChartData;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Titled bar chart card fed by the primary series.
pub struct ReportsBarChart<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub chart: &'a ChartData,
    pub theme: &'a Theme,
}

impl<'a> ReportsBarChart<'a> {
    pub fn new(title: &'a str, description: &'a str, chart: &'a ChartData, theme: &'a Theme) -> Self {
        Self {
            title,
            description,
            chart,
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

    /// One bar per label; values past the label count are ignored.
    pub fn bars(&self) -> Vec<Bar<'a>> {
        self.chart
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let value = self.chart.values.get(i).copied().unwrap_or(0.0);
                Bar::default()
                    .value(bar_value(value))
                    .label(Line::from(label.clone()))
                    .text_value(format_compact(value))
            })
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.chart.labels.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No data", self.theme.dim))
                    .alignment(Alignment::Center)
                    .block(self.block()),
                area,
            );
            return;
        }

        let bars = self.bars();
        let inner_width = area.width.saturating_sub(2);
        let widget = BarChart::default()
            .block(self.block())
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width(inner_width, bars.len()))
            .bar_gap(1)
            .bar_style(self.theme.bar)
            .value_style(self.theme.bar_value)
            .label_style(self.theme.bar_label);

        frame.render_widget(widget, area);
    }
}

/// Widest bar that fits `count` bars with one-column gaps into `width`.
pub fn bar_width(width: u16, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let gaps = count - 1;
    let width = usize::from(width);
    let per_bar = width.saturating_sub(gaps) / count;
    per_bar.clamp(1, width.max(1)) as u16
}

/// Bars are drawn from whole non-negative heights.
pub fn bar_value(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

// ── Tests ─────────────────────────────────────────────────────────────────────
