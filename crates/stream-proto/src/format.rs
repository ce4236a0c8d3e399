//! Display formatting for schedule cards and the live panel.
//!
//! Everything here is pure: the observer's time zone and the current time are
//! passed in through [`ZoneProvider`] and [`Clock`], never read ambiently.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

use crate::protocol::{watch_url, ScheduledVideoEntry};

/// `June 2, 2024 at 10:00:00 AM`
pub const START_TIME_FORMAT: &str = "%B %-d, %Y at %-I:%M:%S %p";

// ── Injected environment ──────────────────────────────────────────────────────

/// The observer's time zone.
pub trait ZoneProvider {
    /// UTC offset in effect at `instant` (may differ across DST boundaries).
    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset;
    /// Human-readable name shown under the schedule.
    fn label(&self) -> String;
}

/// The system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalZone;

impl ZoneProvider for LocalZone {
    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        instant.with_timezone(&Local).offset().fix()
    }

    fn label(&self) -> String {
        match std::env::var("TZ") {
            Ok(tz) if !tz.trim().is_empty() => tz,
            _ => Local::now().format("UTC%:z").to_string(),
        }
    }
}

/// A constant offset with a caller-chosen label.
#[derive(Debug, Clone)]
pub struct FixedZone {
    offset: FixedOffset,
    label: String,
}

impl FixedZone {
    pub fn new(offset: FixedOffset, label: impl Into<String>) -> Self {
        Self {
            offset,
            label: label.into(),
        }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix(), "UTC")
    }
}

impl ZoneProvider for FixedZone {
    fn offset_at(&self, _instant: &DateTime<Utc>) -> FixedOffset {
        self.offset
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Long-form local start time, month name and 12-hour clock with seconds.
pub fn format_start_time<Z: ZoneProvider + ?Sized>(instant: &DateTime<Utc>, zone: &Z) -> String {
    instant
        .with_timezone(&zone.offset_at(instant))
        .format(START_TIME_FORMAT)
        .to_string()
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id)
}

/// Banner image for the schedule page, `None` when no id is configured.
pub fn banner_url(thumbnail_id: &str) -> Option<String> {
    let id = thumbnail_id.trim();
    if id.is_empty() {
        None
    } else {
        Some(thumbnail_url(id))
    }
}

/// Compact duration: `45s`, `12m`, `1h 05m`, `2d 03h`. Negative spans are
/// formatted by magnitude.
pub fn format_duration(span: chrono::Duration) -> String {
    let secs = span.num_seconds().unsigned_abs();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;
    if days > 0 {
        format!("{}d {:02}h", days, hours)
    } else if hours > 0 {
        format!("{}h {:02}m", hours, mins)
    } else if mins > 0 {
        format!("{}m", mins)
    } else {
        format!("{}s", secs)
    }
}

// ── Schedule list ─────────────────────────────────────────────────────────────

/// Entries in ascending start order. The sort is stable, so entries sharing a
/// start time keep their response order.
pub fn sort_by_schedule(entries: &[ScheduledVideoEntry]) -> Vec<&ScheduledVideoEntry> {
    let mut sorted: Vec<&ScheduledVideoEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.scheduled_time);
    sorted
}

/// Display-ready form of one schedule entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCard {
    pub video_id: String,
    pub title: String,
    pub kind: String,
    pub channel_name: String,
    pub start_time: String,
    pub thumbnail: String,
    pub watch_url: String,
}

impl VideoCard {
    pub fn from_entry<Z: ZoneProvider + ?Sized>(entry: &ScheduledVideoEntry, zone: &Z) -> Self {
        Self {
            video_id: entry.video_id.clone(),
            title: entry.title.clone(),
            kind: entry.kind.clone(),
            channel_name: entry.channel_name.clone(),
            start_time: format_start_time(&entry.scheduled_time, zone),
            thumbnail: thumbnail_url(&entry.video_id),
            watch_url: watch_url(&entry.video_id),
        }
    }
}

/// Sorted, formatted cards. Absent records render nothing.
pub fn schedule_cards<Z: ZoneProvider + ?Sized>(
    records: Option<&[ScheduledVideoEntry]>,
    zone: &Z,
) -> Vec<VideoCard> {
    let Some(records) = records else {
        return Vec::new();
    };
    sort_by_schedule(records)
        .into_iter()
        .map(|e| VideoCard::from_entry(e, zone))
        .collect()
}
