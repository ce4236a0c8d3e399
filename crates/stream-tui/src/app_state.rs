//! AppState: data shared read-only with every component during render and
//! key handling. Only the App event loop writes to it.

use std::sync::Arc;

use stream_proto::format::{Clock, ZoneProvider};
use stream_proto::live::LiveView;
use stream_proto::schedule::ScheduleView;

use crate::action::Page;
use crate::widgets::progress_bar::Countdown;

pub struct AppState {
    pub page: Page,
    pub live: LiveView,
    pub schedule: ScheduleView,
    /// Drives the live page's interval signal; only runs while auto-refresh is on.
    pub countdown: Countdown,
    pub zone: Arc<dyn ZoneProvider + Send + Sync>,
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Schedule banner image, when one is configured.
    pub banner_url: Option<String>,
    /// Shown in the nav bar so it is obvious which backend is polled.
    pub api_base: String,
}
