//! Full-screen dashboard view.
//!
//! Layout, top to bottom: header, statistic card row, chart row (bar chart,
//! sales line, tasks line) and a one-line footer.

use dashboard_core::models::{DashboardCharts, StatCard};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use crate::components::bar_chart::ReportsBarChart;
use crate::components::header::Header;
use crate::components::line_chart::ReportsLineChart;
use crate::components::stat_card::StatCardView;
use crate::themes::Theme;

pub const BAR_TITLE: &str = "Daily Sumqty";
pub const BAR_DESCRIPTION: &str = "Weekly summary fetched from API";
pub const SALES_TITLE: &str = "Daily Sales";
pub const TASKS_TITLE: &str = "Completed Tasks";
pub const LINE_DESCRIPTION: &str = "Synced with weekly summary";

/// Everything one frame of the dashboard needs.
#[derive(Debug, Clone)]
pub struct DashboardViewData<'a> {
    /// Endpoint host shown in the header.
    pub endpoint: &'a str,
    pub status: &'a str,
    pub status_style: Style,
    pub cards: &'a [StatCard],
    pub charts: &'a DashboardCharts,
    /// Pre-formatted local time of the last update.
    pub last_updated: Option<String>,
}

pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Header::new(data.endpoint, data.status, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), rows[0]);

    render_cards(frame, rows[1], data.cards, theme);
    render_charts(frame, rows[2], data.charts, theme);
    frame.render_widget(Paragraph::new(footer_line(data, theme)), rows[3]);
}

fn render_cards(frame: &mut Frame, area: Rect, cards: &[StatCard], theme: &Theme) {
    if cards.is_empty() {
        return;
    }
    let n = cards.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Ratio(1, n)))
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        StatCardView::new(card, theme).render(frame, *column);
    }
}

fn render_charts(frame: &mut Frame, area: Rect, charts: &DashboardCharts, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    ReportsBarChart::new(BAR_TITLE, BAR_DESCRIPTION, &charts.bar, theme).render(frame, columns[0]);
    ReportsLineChart::new(
        SALES_TITLE,
        LINE_DESCRIPTION,
        &charts.sales,
        theme.line_sales,
        theme,
    )
    .render(frame, columns[1]);
    ReportsLineChart::new(
        TASKS_TITLE,
        LINE_DESCRIPTION,
        &charts.tasks,
        theme.line_tasks,
        theme,
    )
    .render(frame, columns[2]);
}

/// `"q quit · <status> · updated HH:MM:SS"`
pub fn footer_line<'a>(data: &DashboardViewData<'a>, theme: &Theme) -> Line<'a> {
    let mut spans = vec![
        Span::styled("q", theme.value),
        Span::styled(" quit", theme.dim),
        Span::styled(" · ", theme.separator),
        Span::styled(data.status, data.status_style),
    ];
    if let Some(ref at) = data.last_updated {
        spans.push(Span::styled(" · ", theme.separator));
        spans.push(Span::styled(format!("updated {at}"), theme.dim));
    }
    Line::from(spans)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
