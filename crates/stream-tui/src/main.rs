mod action;
mod app;
mod app_state;
mod component;
mod components;
mod theme;
mod widgets;

use std::sync::Arc;
use std::time::Duration;

use stream_proto::api::ApiClient;
use stream_proto::config::Config;
use stream_proto::format::{banner_url, LocalZone, SystemClock};
use stream_proto::live::LiveView;
use stream_proto::platform;
use stream_proto::schedule::ScheduleView;

use crate::action::Page;
use crate::app_state::AppState;
use crate::widgets::progress_bar::Countdown;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = platform::log_path();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("streamwatch log: {}", log_path.display());

    tracing::info!("streamwatch starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {}", e);
        Config::default()
    });
    config.apply_env();

    let api = ApiClient::new(&config.api)?;
    tracing::info!("polling {}", api.base_url());

    let state = AppState {
        page: Page::Live,
        live: LiveView::new(config.live.auto_refresh),
        schedule: ScheduleView::new(),
        countdown: Countdown::new(Duration::from_secs(config.live.refresh_interval_secs.max(1))),
        zone: Arc::new(LocalZone),
        clock: Arc::new(SystemClock),
        banner_url: banner_url(&config.schedule.thumbnail_id),
        api_base: api.base_url().to_string(),
    };

    app::App::new(state, api).run().await
}
