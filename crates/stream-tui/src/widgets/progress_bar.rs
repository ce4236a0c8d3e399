//! Refresh countdown and the smooth Unicode bar that shows it.
//!
//! The countdown is the live page's interval source: when a cycle completes
//! the app treats it as "interval elapsed" and starts the next cycle.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_PROGRESS, C_SECONDARY};

#[derive(Debug, Clone)]
pub struct Countdown {
    period: Duration,
    started: Instant,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            started: Instant::now(),
        }
    }

    /// Begin a fresh cycle from zero.
    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    /// Fraction of the current cycle that has passed, 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        if self.period.is_zero() {
            return 1.0;
        }
        (self.started.elapsed().as_secs_f64() / self.period.as_secs_f64()).min(1.0)
    }

    pub fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.started.elapsed())
    }

    /// Returns `true` once per completed cycle and restarts the countdown.
    pub fn poll_elapsed(&mut self) -> bool {
        if self.started.elapsed() >= self.period {
            self.restart();
            true
        } else {
            false
        }
    }
}

/// Render a smooth progress bar in `area`.
/// `progress` is 0.0..=1.0; labels are drawn left and right of the bar.
pub fn draw_progress(
    frame: &mut Frame,
    area: Rect,
    progress: f64,
    left_label: Option<&str>,
    right_label: Option<&str>,
) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let left_label = left_label.unwrap_or_default();
    let right_label = right_label.unwrap_or_default();
    let label_w = (left_label.chars().count() + right_label.chars().count() + 2) as u16;
    let bar_w = area.width.saturating_sub(label_w).max(4) as usize;

    let mut spans = Vec::new();
    if !left_label.is_empty() {
        spans.push(Span::styled(
            format!("{} ", left_label),
            Style::default().fg(C_SECONDARY),
        ));
    }
    spans.push(Span::styled(bar_cells(progress, bar_w), Style::default().fg(C_PROGRESS)));
    if !right_label.is_empty() {
        spans.push(Span::styled(
            format!(" {}", right_label),
            Style::default().fg(C_MUTED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// `bar_w` cells of fill using eighth-blocks for the partial cell.
fn bar_cells(progress: f64, bar_w: usize) -> String {
    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

    let eighths = (progress.clamp(0.0, 1.0) * bar_w as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(bar_w * 3);
    for _ in 0..full_blocks {
        bar.push('█');
    }
    if full_blocks < bar_w {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..bar_w {
            bar.push(' ');
        }
    }
    bar
}

pub fn fmt_time(d: Duration) -> String {
    let s = d.as_secs();
    let h = s / 3600;
    let m = (s % 3600) / 60;
    let s = s % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_period_always_elapses() {
        let mut c = Countdown::new(Duration::ZERO);
        assert_eq!(c.progress(), 1.0);
        assert!(c.poll_elapsed());
        assert!(c.poll_elapsed());
    }

    #[test]
    fn long_period_has_not_elapsed() {
        let mut c = Countdown::new(Duration::from_secs(3600));
        assert!(!c.poll_elapsed());
        assert!(c.progress() < 0.01);
        assert!(c.remaining() > Duration::from_secs(3590));
    }

    #[test]
    fn elapsed_cycle_restarts() {
        let mut c = Countdown::new(Duration::from_millis(200));
        std::thread::sleep(Duration::from_millis(250));
        assert_eq!(c.progress(), 1.0);
        assert!(c.poll_elapsed());
        assert!(c.progress() < 1.0);
    }

    #[test]
    fn bar_fill() {
        assert_eq!(bar_cells(0.0, 4), "    ");
        assert_eq!(bar_cells(1.0, 4), "████");
        assert_eq!(bar_cells(0.5, 4), "██  ");
        assert_eq!(bar_cells(0.625, 4), "██▌ ");
        assert_eq!(bar_cells(7.0, 2).chars().count(), 2);
    }

    #[test]
    fn time_labels() {
        assert_eq!(fmt_time(Duration::from_secs(5)), "0:05");
        assert_eq!(fmt_time(Duration::from_secs(61)), "1:01");
        assert_eq!(fmt_time(Duration::from_secs(3723)), "1:02:03");
    }
}
