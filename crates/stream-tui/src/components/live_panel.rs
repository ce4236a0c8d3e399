//! LivePanel: current/last stream status, refresh countdown and the
//! auto-refresh checkbox.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use stream_proto::format::{Clock, ZoneProvider};
use stream_proto::live::{describe_status, LiveSnapshot};
use stream_proto::protocol::StreamState;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_CHANNEL, C_ERROR, C_LINK, C_LIVE, C_MUTED, C_PRIMARY, C_SECONDARY, C_UPCOMING},
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        progress_bar::{draw_progress, fmt_time},
    },
};

#[derive(Default)]
pub struct LivePanel;

impl LivePanel {
    pub fn new() -> Self {
        Self
    }
}

/// Body text of the status pane. Kept free of any terminal state so it can be
/// checked directly.
pub fn status_lines<C, Z>(snap: &LiveSnapshot<'_>, clock: &C, zone: &Z) -> Vec<Line<'static>>
where
    C: Clock + ?Sized,
    Z: ZoneProvider + ?Sized,
{
    let mut lines = Vec::new();

    match snap.status {
        None if snap.busy => {
            lines.push(Line::from(Span::styled(
                "Loading live status…",
                Style::default().fg(C_SECONDARY),
            )));
        }
        None if snap.error.is_none() => {
            lines.push(Line::from(Span::styled(
                "No live status yet.",
                Style::default().fg(C_MUTED),
            )));
        }
        None => {}
        Some(status) => {
            let summary = describe_status(status, clock, zone);
            let color = match summary.state {
                StreamState::Live => C_LIVE,
                StreamState::Upcoming => C_UPCOMING,
                StreamState::Past | StreamState::Unknown => C_SECONDARY,
            };
            lines.push(Line::from(Span::styled(
                summary.headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                summary.title,
                Style::default().fg(C_PRIMARY),
            )));
            lines.push(Line::from(Span::styled(
                summary.channel,
                Style::default().fg(C_CHANNEL),
            )));
            if let Some(timing) = summary.timing {
                lines.push(Line::from(Span::styled(
                    timing,
                    Style::default().fg(C_SECONDARY),
                )));
            }
            lines.push(Line::from(Span::styled(
                summary.watch_url,
                Style::default().fg(C_LINK),
            )));
        }
    }

    if let Some(err) = snap.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Error: {}", err),
            Style::default().fg(C_ERROR),
        )));
        if snap.status.is_some() {
            lines.push(Line::from(Span::styled(
                "(showing last known status)",
                Style::default().fg(C_MUTED),
            )));
        }
    }

    lines
}

fn badge(snap: &LiveSnapshot<'_>) -> Option<Badge<'static>> {
    if snap.busy {
        Some(Badge::pending("…"))
    } else if snap.error.is_some() {
        Some(Badge::ERROR)
    } else if snap.status.is_some_and(|s| s.state() == StreamState::Live) {
        Some(Badge::LIVE)
    } else {
        None
    }
}

fn checkbox_line(checked: bool) -> Line<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    Line::from(vec![
        Span::styled(format!(" {} ", mark), Style::default().fg(C_PRIMARY)),
        Span::styled("Auto-refresh live status", Style::default().fg(C_SECONDARY)),
        Span::styled("  (a)", Style::default().fg(C_MUTED)),
    ])
}

impl Component for LivePanel {
    fn id(&self) -> ComponentId {
        ComponentId::LivePanel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('a') | KeyCode::Char(' ') => vec![Action::ToggleAutoRefresh],
            KeyCode::Char('y') => state
                .live
                .status()
                .map(|s| vec![Action::CopyToClipboard(s.watch_url())])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let snap = state.live.snapshot();
        let progress_h = if snap.auto_refresh { 1 } else { 0 };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(progress_h),
                Constraint::Length(1),
            ])
            .split(area);

        let block = pane_chrome("live status", badge(&snap));
        let inner = block.inner(rows[0]);
        frame.render_widget(block, rows[0]);
        let body = status_lines(&snap, state.clock.as_ref(), state.zone.as_ref());
        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), inner);

        if snap.auto_refresh {
            let remaining = fmt_time(state.countdown.remaining());
            draw_progress(
                frame,
                rows[1],
                state.countdown.progress(),
                Some(" next refresh"),
                Some(remaining.as_str()),
            );
        }

        frame.render_widget(Paragraph::new(checkbox_line(snap.auto_refresh)), rows[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stream_proto::api::FetchError;
    use stream_proto::format::{FixedClock, FixedZone};
    use stream_proto::protocol::{ChannelInfo, LiveStreamStatus};

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn live_status() -> LiveStreamStatus {
        LiveStreamStatus {
            status: "live".to_string(),
            available_at: None,
            start_actual: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
            end_actual: None,
            title: "karaoke".to_string(),
            id: "abc".to_string(),
            channel: ChannelInfo {
                name: "native".to_string(),
                english_name: Some("English".to_string()),
            },
        }
    }

    fn render(snap: LiveSnapshot<'_>) -> Vec<String> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 13, 5, 0).unwrap());
        text(&status_lines(&snap, &clock, &FixedZone::utc()))
    }

    #[test]
    fn loading_placeholder() {
        let out = render(LiveSnapshot {
            status: None,
            busy: true,
            error: None,
            auto_refresh: true,
        });
        assert_eq!(out, ["Loading live status…"]);
    }

    #[test]
    fn empty_placeholder() {
        let out = render(LiveSnapshot {
            status: None,
            busy: false,
            error: None,
            auto_refresh: false,
        });
        assert_eq!(out, ["No live status yet."]);
    }

    #[test]
    fn live_status_lines() {
        let status = live_status();
        let out = render(LiveSnapshot {
            status: Some(&status),
            busy: false,
            error: None,
            auto_refresh: true,
        });
        assert_eq!(out[0], "LIVE NOW");
        assert_eq!(out[1], "karaoke");
        assert_eq!(out[2], "English");
        assert_eq!(out[3], "Started June 1, 2024 at 12:00:00 PM (1h 05m ago)");
        assert_eq!(out[4], "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn error_keeps_last_status() {
        let status = live_status();
        let err = FetchError::Network("connection refused".to_string());
        let out = render(LiveSnapshot {
            status: Some(&status),
            busy: false,
            error: Some(&err),
            auto_refresh: true,
        });
        assert_eq!(out[0], "LIVE NOW");
        assert!(out.iter().any(|l| l.starts_with("Error: ")));
        assert_eq!(out.last().map(String::as_str), Some("(showing last known status)"));
    }

    #[test]
    fn error_without_status() {
        let err = FetchError::Decode("expected value".to_string());
        let out = render(LiveSnapshot {
            status: None,
            busy: false,
            error: Some(&err),
            auto_refresh: false,
        });
        assert!(out.iter().any(|l| l.starts_with("Error: ")));
        assert!(!out.iter().any(|l| l.contains("last known")));
    }

    #[test]
    fn badges() {
        let status = live_status();
        let err = FetchError::Network("x".to_string());
        let busy = LiveSnapshot {
            status: Some(&status),
            busy: true,
            error: Some(&err),
            auto_refresh: true,
        };
        assert_eq!(badge(&busy).map(|b| b.text), Some("…"));
        let errored = LiveSnapshot { busy: false, ..busy };
        assert_eq!(badge(&errored).map(|b| b.text), Some("ERR"));
        let ok = LiveSnapshot { error: None, ..errored };
        assert_eq!(badge(&ok).map(|b| b.text), Some("LIVE"));
    }

    #[test]
    fn checkbox_reflects_flag() {
        let on: String = checkbox_line(true).spans.iter().map(|s| s.content.as_ref()).collect();
        let off: String = checkbox_line(false).spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(on.starts_with(" [x]"));
        assert!(off.starts_with(" [ ]"));
    }
}
