//! Wire types for the schedule and live-status endpoints.
//!
//! Both endpoints speak JSON with snake_case keys and ISO-8601 timestamps.
//! Records are decoded once and never mutated; a refetch replaces them
//! wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Schedule ──────────────────────────────────────────────────────────────────

/// One upcoming video from `GET /api/upcoming`. Identity is `video_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledVideoEntry {
    #[serde(default)]
    pub title: String,
    /// Video type as reported upstream ("stream", "placeholder", ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    pub scheduled_time: DateTime<Utc>,
    #[serde(default)]
    pub channel_name: String,
    pub video_id: String,
}

/// Envelope returned by `GET /api/upcoming`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpcomingResponse {
    #[serde(default)]
    pub scheduled_videos: Vec<ScheduledVideoEntry>,
}

// ── Live status ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub english_name: Option<String>,
}

impl ChannelInfo {
    /// English name when the API has one, otherwise the native name.
    pub fn display_name(&self) -> &str {
        match self.english_name.as_deref() {
            Some(en) if !en.trim().is_empty() => en,
            _ => &self.name,
        }
    }
}

/// Snapshot returned by `GET /api/live`: the current stream, or the most
/// recent past one when the channel is offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStreamStatus {
    pub status: String,
    #[serde(default)]
    pub available_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_actual: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_actual: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: String,
    pub id: String,
    #[serde(default)]
    pub channel: ChannelInfo,
}

/// Coarse interpretation of [`LiveStreamStatus::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Live,
    Upcoming,
    Past,
    Unknown,
}

impl StreamState {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "live" => Self::Live,
            "upcoming" => Self::Upcoming,
            "past" => Self::Past,
            _ => Self::Unknown,
        }
    }
}

impl LiveStreamStatus {
    pub fn state(&self) -> StreamState {
        StreamState::parse(&self.status)
    }

    pub fn watch_url(&self) -> String {
        watch_url(&self.id)
    }
}

/// Public watch page for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
