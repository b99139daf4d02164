use dashboard_core::models::StatCard;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::truncate_to_width;
use crate::themes::Theme;

/// Bordered statistic card: headline figure plus a change line.
pub struct StatCardView<'a> {
    pub card: &'a StatCard,
    pub theme: &'a Theme,
}

impl<'a> StatCardView<'a> {
    pub fn new(card: &'a StatCard, theme: &'a Theme) -> Self {
        Self { card, theme }
    }

    /// Block title, e.g. `" $ Revenue "`, cut to `max_width` columns.
    pub fn title(&self, max_width: usize) -> String {
        let raw = if self.card.icon.is_empty() {
            self.card.title.clone()
        } else {
            format!("{} {}", self.card.icon, self.card.title)
        };
        format!(" {} ", truncate_to_width(&raw, max_width.saturating_sub(2)))
    }

    /// Body lines: the count, then `"<amount> <label>"`.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let change = &self.card.change;
        let mut change_spans = Vec::new();
        if !change.amount.is_empty() {
            change_spans.push(Span::styled(
                change.amount.as_str(),
                self.theme.tone_style(change.tone),
            ));
            change_spans.push(Span::raw(" "));
        }
        change_spans.push(Span::styled(change.label.as_str(), self.theme.dim));

        vec![
            Line::from(Span::styled(self.card.count.as_str(), self.theme.card_count)),
            Line::from(change_spans),
        ]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = self.title(area.width.saturating_sub(2) as usize);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.card_border)
            .title(Span::styled(title, self.theme.card_title));

        frame.render_widget(
            Paragraph::new(Text::from(self.to_lines())).block(block),
            area,
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
