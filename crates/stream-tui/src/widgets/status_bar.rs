//! Keybindings footer.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Page;
use crate::theme::{C_KEY_HINT, C_MUTED};

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, page: Page) {
    let keys = match page {
        Page::Live => " a auto-refresh  y copy link  1/2/Tab pages  q quit",
        Page::Schedule => " ↑↓/jk select  g/G first/last  y copy link  1/2/Tab pages  q quit",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", page.label().to_uppercase()),
            Style::default().fg(C_KEY_HINT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
