//! SchedulePanel: banner, upcoming video cards, time zone footer.
//!
//! Each card takes `CARD_HEIGHT` rows. Selection is an index into the
//! sorted card list; the panel scrolls just enough to keep it visible.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use stream_proto::format::VideoCard;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::truncate_to_width,
    theme::{
        style_selected_card, C_ACCENT, C_CHANNEL, C_LINK, C_MUTED, C_PRIMARY, C_SECONDARY,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

const CARD_HEIGHT: usize = 5;
const PAGE_STEP: usize = 5;

#[derive(Default)]
pub struct SchedulePanel {
    selected: usize,
    /// Index of the first visible card.
    scroll: usize,
}

impl SchedulePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection inside `len` cards and visible in `visible` slots.
    fn clamp(&mut self, len: usize, visible: usize) {
        if len == 0 {
            self.selected = 0;
            self.scroll = 0;
            return;
        }
        self.selected = self.selected.min(len - 1);
        let visible = visible.max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
        self.scroll = self.scroll.min(len.saturating_sub(visible));
    }

    fn selected_card(&self, state: &AppState) -> Option<VideoCard> {
        state
            .schedule
            .cards(state.zone.as_ref())
            .into_iter()
            .nth(self.selected)
    }
}

fn card_lines(card: &VideoCard, width: usize, selected: bool) -> Vec<Line<'static>> {
    let marker = if selected { "▶ " } else { "  " };
    let inner = width.saturating_sub(2);
    vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(C_ACCENT)),
            Span::styled(
                truncate_to_width(&card.title, inner),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_to_width(&card.start_time, inner),
                Style::default().fg(C_SECONDARY),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_to_width(&format!("{} · {}", card.channel_name, card.kind), inner),
                Style::default().fg(C_CHANNEL),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_to_width(&card.thumbnail, inner),
                Style::default().fg(C_LINK),
            ),
        ]),
        Line::default(),
    ]
}

impl Component for SchedulePanel {
    fn id(&self) -> ComponentId {
        ComponentId::SchedulePanel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => vec![Action::SelectUp(1)],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::SelectDown(1)],
            KeyCode::PageUp => vec![Action::SelectUp(PAGE_STEP)],
            KeyCode::PageDown => vec![Action::SelectDown(PAGE_STEP)],
            KeyCode::Home | KeyCode::Char('g') => vec![Action::SelectFirst],
            KeyCode::End | KeyCode::Char('G') => vec![Action::SelectLast],
            KeyCode::Char('y') => self
                .selected_card(state)
                .map(|card| vec![Action::CopyToClipboard(card.watch_url)])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        let len = state.schedule.records().map_or(0, |r| r.len());
        let last = len.saturating_sub(1);
        match action {
            Action::SelectUp(n) => self.selected = self.selected.saturating_sub(*n),
            Action::SelectDown(n) => self.selected = (self.selected + n).min(last),
            Action::SelectFirst => self.selected = 0,
            Action::SelectLast => self.selected = last,
            _ => {}
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let pending = state.schedule.is_pending();
        let block = pane_chrome("Schedule", pending.then_some(Badge::pending("loading")));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);
        let width = inner.width as usize;

        // ── Header ────────────────────────────────────────────────────────────
        let mut header = vec![Line::from(Span::styled(
            "Lets hope that the schedule is up to date...",
            Style::default().fg(C_SECONDARY),
        ))];
        if let Some(banner) = &state.banner_url {
            header.push(Line::from(Span::styled(
                truncate_to_width(banner, width),
                Style::default().fg(C_LINK),
            )));
        }
        frame.render_widget(Paragraph::new(header), rows[0]);

        // ── Cards ─────────────────────────────────────────────────────────────
        let cards = state.schedule.cards(state.zone.as_ref());
        let visible = rows[1].height as usize / CARD_HEIGHT;
        self.clamp(cards.len(), visible);

        let body: Vec<Line> = if cards.is_empty() && pending {
            vec![Line::from(Span::styled(
                "  Fetching schedule…",
                Style::default().fg(C_MUTED),
            ))]
        } else {
            cards
                .iter()
                .enumerate()
                .skip(self.scroll)
                .take(visible.max(1))
                .flat_map(|(i, card)| {
                    let selected = i == self.selected;
                    card_lines(card, width, selected).into_iter().map(move |line| {
                        if selected {
                            line.style(style_selected_card())
                        } else {
                            line
                        }
                    })
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(body), rows[1]);

        // ── Footer ────────────────────────────────────────────────────────────
        let mut footer = vec![Span::styled(
            format!(" times shown in {}", state.zone.label()),
            Style::default().fg(C_MUTED),
        )];
        if !cards.is_empty() {
            footer.push(Span::styled(
                format!("  {}/{}", self.selected + 1, cards.len()),
                Style::default().fg(C_SECONDARY),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(footer)), rows[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> VideoCard {
        VideoCard {
            video_id: "abc".to_string(),
            title: "Morning chat".to_string(),
            kind: "stream".to_string(),
            channel_name: "chan".to_string(),
            start_time: "June 2, 2024 at 10:00:00 AM".to_string(),
            thumbnail: "https://img.youtube.com/vi/abc/maxresdefault.jpg".to_string(),
            watch_url: "https://www.youtube.com/watch?v=abc".to_string(),
        }
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn card_is_fixed_height() {
        let lines = card_lines(&card(), 80, false);
        assert_eq!(lines.len(), CARD_HEIGHT);
        assert_eq!(text(&lines[0]), "  Morning chat");
        assert_eq!(text(&lines[1]), "  June 2, 2024 at 10:00:00 AM");
        assert_eq!(text(&lines[2]), "  chan · stream");
    }

    #[test]
    fn selected_card_has_marker() {
        let lines = card_lines(&card(), 80, true);
        assert!(text(&lines[0]).starts_with("▶ "));
    }

    #[test]
    fn narrow_card_is_truncated() {
        let lines = card_lines(&card(), 10, false);
        assert_eq!(text(&lines[0]), "  Morning…");
    }

    #[test]
    fn clamp_keeps_selection_visible() {
        let mut panel = SchedulePanel::new();
        panel.selected = 9;
        panel.clamp(10, 3);
        assert_eq!(panel.scroll, 7);

        panel.selected = 2;
        panel.clamp(10, 3);
        assert_eq!(panel.scroll, 2);

        panel.selected = 50;
        panel.clamp(4, 3);
        assert_eq!(panel.selected, 3);
        assert_eq!(panel.scroll, 1);

        panel.clamp(0, 3);
        assert_eq!((panel.selected, panel.scroll), (0, 0));
    }
}
