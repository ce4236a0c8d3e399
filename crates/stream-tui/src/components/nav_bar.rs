//! NavBar: page tabs plus the backend being polled.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId, Page},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_KEY_HINT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SEPARATOR},
};

#[derive(Default)]
pub struct NavBar;

impl NavBar {
    pub fn new() -> Self {
        Self
    }
}

impl Component for NavBar {
    fn id(&self) -> ComponentId {
        ComponentId::NavBar
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('1') => vec![Action::SwitchPage(Page::Live)],
            KeyCode::Char('2') => vec![Action::SwitchPage(Page::Schedule)],
            KeyCode::Tab | KeyCode::BackTab => vec![Action::NextPage],
            _ => Vec::new(),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height == 0 {
            return;
        }

        let mut spans = vec![Span::styled(
            " streamwatch ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        )];
        for page in Page::ALL {
            let active = page == state.page;
            spans.push(Span::styled(" │ ", Style::default().fg(C_SEPARATOR)));
            spans.push(Span::styled(
                format!("[{}] ", page.number_key()),
                Style::default().fg(C_KEY_HINT),
            ));
            let style = if active {
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_MUTED)
            };
            spans.push(Span::styled(page.label(), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        let backend = Line::from(Span::styled(
            format!("{} ", state.api_base),
            Style::default().fg(C_SECONDARY),
        ));
        frame.render_widget(Paragraph::new(backend).alignment(Alignment::Right), area);
    }
}
