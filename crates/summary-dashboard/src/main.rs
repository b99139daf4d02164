mod bootstrap;

use std::time::Duration;

use anyhow::Result;
use dashboard_core::defaults::DashboardDefaults;
use dashboard_core::error::Result as DashboardResult;
use dashboard_core::models::ChartBundle;
use dashboard_core::settings::Settings;
use dashboard_data::client::SummaryClient;
use dashboard_runtime::orchestrator::{resolve_update, DashboardOrchestrator};
use dashboard_ui::app::App;
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();
    settings.validate()?;

    bootstrap::ensure_directories()?;

    // The TUI owns the terminal, so the dashboard always logs to a file.
    let log_file = match settings.view.as_str() {
        "dashboard" => Some(
            settings
                .log_file
                .clone()
                .unwrap_or_else(bootstrap::default_log_file),
        ),
        _ => settings.log_file.clone(),
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_ref())?;

    tracing::info!("Summary Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        url = %settings.url,
        view = %settings.view,
        refresh_rate = settings.refresh_rate,
        "configuration loaded"
    );

    let defaults = bootstrap::load_defaults(settings.defaults_file.as_deref())?;
    let client = SummaryClient::new(settings.url.clone(), Duration::from_secs(settings.timeout))?;

    match settings.view.as_str() {
        "dashboard" => run_dashboard(&settings, client, defaults).await?,
        "json" => print_json(client, &defaults).await?,
        unknown => eprintln!("Unknown view mode: {}", unknown),
    }

    Ok(())
}

async fn run_dashboard(
    settings: &Settings,
    client: SummaryClient,
    defaults: DashboardDefaults,
) -> Result<()> {
    if settings.is_periodic() {
        tracing::info!("refreshing every {}s", settings.refresh_rate);
    }

    let app = App::new(settings.endpoint_host(), &defaults);
    let orchestrator =
        DashboardOrchestrator::new(client, u64::from(settings.refresh_rate), defaults);
    let (rx, handle) = orchestrator.start();

    // Ctrl+C is also caught at the OS level in case it arrives outside raw mode.
    tokio::select! {
        result = app.run(rx) => {
            handle.cancel();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; cancelling fetch task");
            handle.cancel();
        }
    }

    Ok(())
}

/// Fetch once and print the normalized bundle with the charts it produces.
async fn print_json(client: SummaryClient, defaults: &DashboardDefaults) -> Result<()> {
    let output = json_output(client.fetch_bundle().await, defaults);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// `{"bundle": ..., "charts": ...}` for one fetch result.
///
/// The bundle is printed whenever the fetch succeeded, even when it had
/// nothing to chart; `null` only on failure.
fn json_output(result: DashboardResult<ChartBundle>, defaults: &DashboardDefaults) -> Value {
    let bundle = result.as_ref().ok().cloned();
    let mut charts = defaults.charts.clone();
    resolve_update(&mut charts, result, defaults);

    json!({
        "bundle": bundle,
        "charts": charts,
    })
}
