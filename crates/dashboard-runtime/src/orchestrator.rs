//! Async fetch orchestrator.
//!
//! Owns the fetch lifecycle of one dashboard instance: an initial fetch on
//! start, optional periodic refreshes, fallback to the configured defaults on
//! failure, and silent cancellation when the dashboard goes away. Updates are
//! sent through an `mpsc` channel so the UI owns its state outright.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashboard_core::defaults::DashboardDefaults;
use dashboard_core::error::Result;
use dashboard_core::models::{ChartBundle, DashboardCharts};
use dashboard_data::client::SummaryClient;
use tokio::sync::{mpsc, watch};
use tokio::time;

use crate::chart_state::apply_bundle;

// ── Public types ──────────────────────────────────────────────────────────────

/// Where the charts in a [`DashboardUpdate`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Freshly fetched and normalized.
    Live,
    /// The fetch failed; the configured defaults were substituted.
    Fallback { reason: String },
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Live => f.write_str("live data"),
            DataSource::Fallback { .. } => f.write_str("fetch failed, showing defaults"),
        }
    }
}

/// A chart snapshot forwarded to the UI layer.
#[derive(Debug, Clone)]
pub struct DashboardUpdate {
    /// Complete chart state to display.
    pub charts: DashboardCharts,
    /// The normalized payload, absent on fallback.
    pub bundle: Option<ChartBundle>,
    pub source: DataSource,
    /// When the fetch completed.
    pub fetched_at: DateTime<Utc>,
}

/// How a single fetch ended.
#[derive(Debug)]
enum FetchOutcome {
    Completed(Result<ChartBundle>),
    Cancelled,
}

// ── DashboardOrchestrator ─────────────────────────────────────────────────────

/// Background fetch coordinator for one dashboard instance.
///
/// Call [`DashboardOrchestrator::start`] to spawn the fetch task and receive
/// a channel endpoint for [`DashboardUpdate`]s.
pub struct DashboardOrchestrator {
    client: SummaryClient,
    /// `None` fetches exactly once.
    refresh_interval: Option<Duration>,
    defaults: DashboardDefaults,
}

impl DashboardOrchestrator {
    /// Create a new orchestrator.
    ///
    /// `refresh_rate_secs == 0` disables periodic refreshes.
    pub fn new(client: SummaryClient, refresh_rate_secs: u64, defaults: DashboardDefaults) -> Self {
        let refresh_interval = (refresh_rate_secs > 0).then(|| Duration::from_secs(refresh_rate_secs));
        Self {
            client,
            refresh_interval,
            defaults,
        }
    }

    /// Spawn the fetch task.
    ///
    /// The returned channel closes once the task has finished (after the
    /// single fetch, or when cancelled).
    pub fn start(self) -> (mpsc::Receiver<DashboardUpdate>, DashboardHandle) {
        let (tx, rx) = mpsc::channel(8);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            self.fetch_loop(tx, cancel_rx).await;
        });

        (
            rx,
            DashboardHandle {
                handle,
                cancel: cancel_tx,
            },
        )
    }

    // ── Private implementation ────────────────────────────────────────────

    async fn fetch_loop(self, tx: mpsc::Sender<DashboardUpdate>, mut cancel: watch::Receiver<bool>) {
        let mut charts = self.defaults.charts.clone();

        if !self.fetch_and_send(&mut charts, &tx, &mut cancel).await {
            return;
        }

        let Some(period) = self.refresh_interval else {
            tracing::debug!("single fetch complete; fetch task exiting");
            return;
        };

        let mut interval = time::interval(period);
        // The first tick fires immediately; the initial fetch already ran.
        interval.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = cancel.changed() => return,
                _ = interval.tick() => {}
            }

            if tx.is_closed() {
                tracing::debug!("dashboard channel closed; exiting loop");
                return;
            }

            if !self.fetch_and_send(&mut charts, &tx, &mut cancel).await {
                return;
            }
        }
    }

    /// Run one fetch and forward the resulting update, if any.
    ///
    /// Returns `false` when the task should stop (cancelled or receiver
    /// gone).
    async fn fetch_and_send(
        &self,
        charts: &mut DashboardCharts,
        tx: &mpsc::Sender<DashboardUpdate>,
        cancel: &mut watch::Receiver<bool>,
    ) -> bool {
        let result = match fetch_cancellable(&self.client, cancel).await {
            FetchOutcome::Completed(result) => result,
            FetchOutcome::Cancelled => return false,
        };

        let Some(update) = resolve_update(charts, result, &self.defaults) else {
            return true;
        };

        tx.send(update).await.is_ok()
    }
}

/// Fold one fetch result into `charts`.
///
/// - Success with matched series: charts updated, a `Live` update returned.
/// - Success with no records or no matched slot: state kept, `None`.
/// - Failure: logged, charts reset to `defaults`, a `Fallback` update
///   returned.
pub fn resolve_update(
    charts: &mut DashboardCharts,
    result: Result<ChartBundle>,
    defaults: &DashboardDefaults,
) -> Option<DashboardUpdate> {
    match result {
        Ok(bundle) => {
            let changes = apply_bundle(charts, &bundle);
            if !changes.any() {
                tracing::debug!(
                    records = bundle.labels.len(),
                    "summary payload had nothing to chart; keeping current data"
                );
                return None;
            }

            tracing::info!(
                records = bundle.labels.len(),
                series = bundle.series.len(),
                "dashboard charts updated"
            );
            Some(DashboardUpdate {
                charts: charts.clone(),
                bundle: Some(bundle),
                source: DataSource::Live,
                fetched_at: Utc::now(),
            })
        }
        Err(e) => {
            if e.is_fetch_error() {
                tracing::warn!(error = %e, "failed to fetch summary data; using defaults");
            } else {
                tracing::error!(error = %e, "summary data unusable; using defaults");
            }
            *charts = defaults.charts.clone();
            Some(DashboardUpdate {
                charts: charts.clone(),
                bundle: None,
                source: DataSource::Fallback {
                    reason: e.to_string(),
                },
                fetched_at: Utc::now(),
            })
        }
    }
}

/// Race the fetch against the cancel signal; cancellation wins ties.
async fn fetch_cancellable(client: &SummaryClient, cancel: &mut watch::Receiver<bool>) -> FetchOutcome {
    if *cancel.borrow() {
        return FetchOutcome::Cancelled;
    }

    tokio::select! {
        biased;
        _ = cancel.changed() => FetchOutcome::Cancelled,
        result = client.fetch_bundle() => FetchOutcome::Completed(result),
    }
}

// ── DashboardHandle ───────────────────────────────────────────────────────────

/// Handle to the background fetch task.
///
/// Dropping the handle cancels the task, like unmounting the dashboard.
pub struct DashboardHandle {
    handle: tokio::task::JoinHandle<()>,
    cancel: watch::Sender<bool>,
}

impl DashboardHandle {
    /// Cancel any in-flight request and stop the task.
    ///
    /// No update is sent and nothing is logged for the aborted fetch.
    pub fn cancel(&self) {
        // The task may already be gone, in which case nobody is listening.
        let _ = self.cancel.send(true);
        self.handle.abort();
    }

    /// `true` once the fetch task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DashboardHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
