//! Short-lived notices stacked above the keys bar, newest at the bottom.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{C_BG, C_INFO, C_SUCCESS, C_UPCOMING};

const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

impl Severity {
    fn lifetime(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(3),
            Self::Warning => Duration::from_secs(5),
        }
    }
}

#[derive(Debug)]
struct Toast {
    text: String,
    severity: Severity,
    until: Instant,
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice. Repeating the visible text only refreshes its timer.
    pub fn push(&mut self, text: impl Into<String>, severity: Severity, lifetime: Duration) {
        let text = text.into();
        self.toasts.retain(|t| t.text != text);
        self.toasts.push(Toast {
            text,
            severity,
            until: Instant::now() + lifetime,
        });
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Info, Severity::Info.lifetime());
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Success, Severity::Success.lifetime());
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Warning, Severity::Warning.lifetime());
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.until > now);
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Draw into the bottom-right of `area`, leaving its last row free.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let max_w = (area.width / 2).max(16).min(area.width);
        let Some(mut y) = (area.y + area.height).checked_sub(2) else {
            return;
        };

        for toast in self.toasts.iter().rev() {
            if y < area.y {
                break;
            }
            let w = (toast.text.width() as u16 + 2).min(max_w);
            let rect = Rect {
                x: area.x + area.width - w,
                y,
                width: w,
                height: 1,
            };
            let bg = match toast.severity {
                Severity::Info => C_INFO,
                Severity::Success => C_SUCCESS,
                Severity::Warning => C_UPCOMING,
            };
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" {} ", toast.text),
                    Style::default().fg(C_BG).bg(bg).add_modifier(Modifier::BOLD),
                )),
                rect,
            );
            if y == 0 {
                break;
            }
            y -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_text_is_not_stacked() {
        let mut t = ToastManager::new();
        t.info("auto-refresh on");
        t.info("auto-refresh on");
        assert_eq!(t.toasts.len(), 1);
    }

    #[test]
    fn oldest_toast_is_dropped_past_limit() {
        let mut t = ToastManager::new();
        for text in ["a", "b", "c", "d"] {
            t.success(text);
        }
        let texts: Vec<_> = t.toasts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["b", "c", "d"]);
    }

    #[test]
    fn expired_toasts_are_dropped() {
        let mut t = ToastManager::new();
        t.push("gone", Severity::Warning, Duration::ZERO);
        t.warning("stays");
        t.tick();
        assert!(!t.is_empty());
        assert_eq!(t.toasts[0].text, "stays");
    }
}
