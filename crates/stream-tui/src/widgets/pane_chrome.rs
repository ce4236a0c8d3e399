//! Bordered pane with its title on the left and a status badge on the right.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType},
};

use crate::theme::{style_pane_border, C_BG, C_ERROR, C_LIVE, C_PRIMARY, C_UPCOMING};

/// Short inverted tag, e.g. `LIVE` or `ERR`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

impl Badge<'static> {
    pub const LIVE: Self = Self {
        text: "LIVE",
        color: C_LIVE,
    };
    pub const ERROR: Self = Self {
        text: "ERR",
        color: C_ERROR,
    };

    /// A request is outstanding.
    pub const fn pending(text: &'static str) -> Self {
        Self {
            text,
            color: C_UPCOMING,
        }
    }
}

pub fn pane_chrome<'a>(title: &'a str, badge: Option<Badge<'a>>) -> Block<'a> {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(style_pane_border())
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                title,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ]));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default()
                    .fg(C_BG)
                    .bg(b.color)
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}
