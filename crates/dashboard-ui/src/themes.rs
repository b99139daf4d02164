use dashboard_core::models::Tone;
use ratatui::style::{Color, Modifier, Style};

/// Every style the dashboard components draw with.
///
/// There is a single palette, tuned for dark terminal backgrounds.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Cards ────────────────────────────────────────────────────────────────
    pub card_border: Style,
    pub card_title: Style,
    pub card_count: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_border: Style,
    pub chart_title: Style,
    pub axis: Style,
    /// Bar fill in the bar chart.
    pub bar: Style,
    /// Numbers printed inside bars.
    pub bar_value: Style,
    pub bar_label: Style,
    pub line_sales: Style,
    pub line_tasks: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark-background terminal theme.
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::DarkGray),
            card_title: Style::default().fg(Color::Gray),
            card_count: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            chart_border: Style::default().fg(Color::DarkGray),
            chart_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            axis: Style::default().fg(Color::Gray),
            bar: Style::default().fg(Color::Blue),
            bar_value: Style::default().fg(Color::Black).bg(Color::Blue),
            bar_label: Style::default().fg(Color::Gray),
            line_sales: Style::default().fg(Color::Green),
            line_tasks: Style::default().fg(Color::Magenta),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Style for a statistic card's change line.
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Neutral => self.label,
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Error => self.error,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
