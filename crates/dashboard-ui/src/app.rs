//! Application state and TUI event loop for the summary dashboard.
//!
//! [`App`] owns the chart state shown on screen and folds in
//! [`DashboardUpdate`]s arriving from the fetch task.

use std::io;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, style::Style, Frame, Terminal};
use tokio::sync::mpsc;

use dashboard_core::defaults::DashboardDefaults;
use dashboard_core::models::{DashboardCharts, StatCard};
use dashboard_runtime::orchestrator::{DashboardUpdate, DataSource};

use crate::dashboard_view::{self, DashboardViewData};
use crate::themes::Theme;

/// Where the charts currently on screen came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Initial fetch still running; defaults shown.
    Pending,
    Live,
    Fallback(String),
    /// The fetch task finished without anything to chart.
    NoData,
}

/// Root application state.
pub struct App {
    pub theme: Theme,
    /// Endpoint host shown in the header.
    pub endpoint: String,
    pub should_quit: bool,
    pub charts: DashboardCharts,
    pub cards: Vec<StatCard>,
    pub fetch_state: FetchState,
    pub last_updated: Option<DateTime<Local>>,
}

impl App {
    pub fn new(endpoint: impl Into<String>, defaults: &DashboardDefaults) -> Self {
        Self {
            theme: Theme::default(),
            endpoint: endpoint.into(),
            should_quit: false,
            charts: defaults.charts.clone(),
            cards: defaults.cards.clone(),
            fetch_state: FetchState::Pending,
            last_updated: None,
        }
    }

    /// Run the dashboard TUI, folding in updates from `rx`.
    ///
    /// Polls the terminal with a 250 ms timeout and drains `rx` without
    /// blocking. A closed channel only stops the draining; the last state
    /// stays on screen until `q`, `Q` or `Ctrl+C`.
    pub async fn run(mut self, rx: mpsc::Receiver<DashboardUpdate>) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);
        let mut rx = Some(rx);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break Ok(());
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break Ok(()),
                        _ => {}
                    }
                }
            }

            if let Some(receiver) = rx.as_mut() {
                if !self.drain(receiver) {
                    rx = None;
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Apply every pending update. Returns `false` once the sender is gone.
    pub fn drain(&mut self, rx: &mut mpsc::Receiver<DashboardUpdate>) -> bool {
        loop {
            match rx.try_recv() {
                Ok(update) => self.apply_update(update),
                Err(mpsc::error::TryRecvError::Empty) => return true,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    if self.fetch_state == FetchState::Pending {
                        self.fetch_state = FetchState::NoData;
                    }
                    tracing::debug!("fetch task finished");
                    return false;
                }
            }
        }
    }

    pub fn apply_update(&mut self, update: DashboardUpdate) {
        self.charts = update.charts;
        self.fetch_state = match update.source {
            DataSource::Live => FetchState::Live,
            DataSource::Fallback { reason } => FetchState::Fallback(reason),
        };
        self.last_updated = Some(update.fetched_at.with_timezone(&Local));
    }

    pub fn status_text(&self) -> &'static str {
        match self.fetch_state {
            FetchState::Pending => "Showing defaults",
            FetchState::Live => "Live data",
            FetchState::Fallback(_) => "Fetch failed, showing defaults",
            FetchState::NoData => "No chartable data, showing defaults",
        }
    }

    fn status_style(&self) -> Style {
        match self.fetch_state {
            FetchState::Pending => self.theme.info,
            FetchState::Live => self.theme.success,
            FetchState::Fallback(_) => self.theme.error,
            FetchState::NoData => self.theme.warning,
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let data = DashboardViewData {
            endpoint: &self.endpoint,
            status: self.status_text(),
            status_style: self.status_style(),
            cards: &self.cards,
            charts: &self.charts,
            last_updated: self.last_updated.map(|t| t.format("%H:%M:%S").to_string()),
        };
        dashboard_view::render_dashboard(frame, area, &data, &self.theme);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
