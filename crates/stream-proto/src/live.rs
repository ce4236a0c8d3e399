//! Live-status page controller.
//!
//! # States
//! ```text
//!  Idle ──mount──▶ Loading ──ok──▶ Ready ──interval──▶ Refetching ──ok──▶ Ready
//!                     │                                     │
//!                     └──err──▶ Errored ◀───────────err─────┘
//!                                  └──interval──▶ Refetching
//! ```
//! Auto-refresh is orthogonal: when it is off, the interval signal does
//! nothing. The first fetch on mount ignores it.
//!
//! A failed fetch keeps the previous snapshot. The error is reported next to
//! it and cleared by the next successful fetch.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::FetchError;
use crate::format::{format_duration, format_start_time, Clock, ZoneProvider};
use crate::protocol::{LiveStreamStatus, StreamState};
use crate::refresh::{Acceptance, FetchSequence, FetchTicket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivePhase {
    Idle,
    Loading,
    Ready,
    Refetching,
    Errored,
}

/// Everything the status panel needs for one render.
#[derive(Debug, Clone, Copy)]
pub struct LiveSnapshot<'a> {
    pub status: Option<&'a LiveStreamStatus>,
    /// `loading || refetching`
    pub busy: bool,
    /// Last error, even if a refetch is running.
    pub error: Option<&'a FetchError>,
    pub auto_refresh: bool,
}

#[derive(Debug)]
pub struct LiveView {
    status: Option<LiveStreamStatus>,
    loading: bool,
    refetching: bool,
    auto_refresh: bool,
    last_error: Option<FetchError>,
    mounted: bool,
    fetches: FetchSequence,
}

impl LiveView {
    pub fn new(auto_refresh: bool) -> Self {
        Self {
            status: None,
            loading: false,
            refetching: false,
            auto_refresh,
            last_error: None,
            mounted: false,
            fetches: FetchSequence::new(),
        }
    }

    /// Enter `Loading` and issue the initial fetch.
    pub fn mount(&mut self) -> FetchTicket {
        self.fetches.rescope();
        self.mounted = true;
        self.loading = true;
        let ticket = self.fetches.issue();
        debug!("[live] mount, fetch #{}", ticket.seq());
        ticket
    }

    /// Stop listening. Outstanding fetches are cancelled and their results
    /// ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.loading = false;
        self.refetching = false;
        self.fetches.cancel_all();
    }

    /// The countdown finished. Returns a ticket when a refetch should go out.
    pub fn on_interval_elapsed(&mut self) -> Option<FetchTicket> {
        if !self.mounted || !self.auto_refresh {
            return None;
        }
        self.refetching = true;
        let ticket = self.fetches.issue();
        debug!("[live] interval elapsed, fetch #{}", ticket.seq());
        Some(ticket)
    }

    /// Apply a completed fetch. Returns `true` if the view changed.
    pub fn on_fetch_complete(
        &mut self,
        seq: u64,
        result: Result<LiveStreamStatus, FetchError>,
    ) -> bool {
        let latest = match self.fetches.accept(seq) {
            Acceptance::Apply { latest } => latest,
            other => {
                debug!("[live] discarding fetch #{} ({:?})", seq, other);
                return false;
            }
        };

        match result {
            Ok(status) => {
                if self.status.as_ref().map(|s| (&s.id, &s.status))
                    != Some((&status.id, &status.status))
                {
                    info!("[live] {} {} {:?}", status.status, status.id, status.title);
                }
                self.status = Some(status);
                self.last_error = None;
            }
            Err(e) => {
                warn!("[live] fetch #{} failed: {}", seq, e);
                self.last_error = Some(e);
            }
        }

        self.loading = false;
        if latest {
            self.refetching = false;
        }
        true
    }

    /// Returns `true` if the flag changed. Never triggers a fetch by itself.
    pub fn set_auto_refresh(&mut self, enabled: bool) -> bool {
        if self.auto_refresh == enabled {
            return false;
        }
        info!("[live] auto-refresh {}", if enabled { "on" } else { "off" });
        self.auto_refresh = enabled;
        true
    }

    /// Flip the flag and return its new value.
    pub fn toggle_auto_refresh(&mut self) -> bool {
        self.set_auto_refresh(!self.auto_refresh);
        self.auto_refresh
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn phase(&self) -> LivePhase {
        if self.loading {
            LivePhase::Loading
        } else if self.refetching {
            LivePhase::Refetching
        } else if self.last_error.is_some() {
            LivePhase::Errored
        } else if self.status.is_some() {
            LivePhase::Ready
        } else {
            LivePhase::Idle
        }
    }

    pub fn status(&self) -> Option<&LiveStreamStatus> {
        self.status.as_ref()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn snapshot(&self) -> LiveSnapshot<'_> {
        LiveSnapshot {
            status: self.status.as_ref(),
            busy: self.loading || self.refetching,
            error: self.last_error.as_ref(),
            auto_refresh: self.auto_refresh,
        }
    }
}

// ── Presentation ──────────────────────────────────────────────────────────────

/// Text lines for the current-status panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSummary {
    pub state: StreamState,
    pub headline: String,
    pub title: String,
    pub channel: String,
    /// e.g. `Started June 1, 2024 at 12:03:10 PM (1h 05m ago)`
    pub timing: Option<String>,
    pub watch_url: String,
}

pub fn describe_status<C, Z>(status: &LiveStreamStatus, clock: &C, zone: &Z) -> StatusSummary
where
    C: Clock + ?Sized,
    Z: ZoneProvider + ?Sized,
{
    let state = status.state();
    let now = clock.now();

    let headline = match state {
        StreamState::Live => "LIVE NOW".to_string(),
        StreamState::Upcoming => "UPCOMING".to_string(),
        StreamState::Past => "LAST STREAM".to_string(),
        StreamState::Unknown => status.status.trim().to_uppercase(),
    };

    let since = |t: DateTime<Utc>| format_duration(now - t);
    let timing = match state {
        StreamState::Live => status.start_actual.or(status.available_at).map(|t| {
            format!("Started {} ({} ago)", format_start_time(&t, zone), since(t))
        }),
        StreamState::Upcoming => status.available_at.map(|t| {
            let when = format_start_time(&t, zone);
            if t > now {
                format!("Scheduled for {} (in {})", when, format_duration(t - now))
            } else {
                format!("Scheduled for {} (starting soon)", when)
            }
        }),
        StreamState::Past | StreamState::Unknown => match status.end_actual {
            Some(t) => Some(format!("Ended {} ({} ago)", format_start_time(&t, zone), since(t))),
            None => status
                .start_actual
                .or(status.available_at)
                .map(|t| format!("Started {}", format_start_time(&t, zone))),
        },
    };

    StatusSummary {
        state,
        headline,
        title: status.title.clone(),
        channel: status.channel.display_name().to_string(),
        timing,
        watch_url: status.watch_url(),
    }
}
