use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. Endpoint and data status in `[ host | status ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Host part of the summary endpoint.
    pub endpoint: &'a str,
    /// Short description of where the shown data came from.
    pub status: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(endpoint: &'a str, status: &'a str, theme: &'a Theme) -> Self {
        Self {
            endpoint,
            status,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" WEEKLY SUMMARY DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.endpoint, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.status, self.theme.info),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
