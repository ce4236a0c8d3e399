//! Palette and shared styles.

use ratatui::style::{Color, Modifier, Style};

// ── Base ──────────────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(16, 18, 22);
pub const C_PRIMARY: Color = Color::Rgb(220, 222, 230);
pub const C_SECONDARY: Color = Color::Rgb(128, 134, 150);
pub const C_MUTED: Color = Color::Rgb(78, 84, 98);
pub const C_SEPARATOR: Color = Color::Rgb(44, 48, 58);
pub const C_ACCENT: Color = Color::Rgb(240, 110, 140);
pub const C_KEY_HINT: Color = Color::Rgb(100, 108, 128);

// ── Stream state ──────────────────────────────────────────────────────────────

pub const C_LIVE: Color = Color::Rgb(235, 70, 70);
pub const C_UPCOMING: Color = Color::Rgb(245, 190, 90);
pub const C_ERROR: Color = Color::Rgb(255, 95, 95);

// ── Schedule cards ────────────────────────────────────────────────────────────

pub const C_CHANNEL: Color = Color::Rgb(120, 170, 230);
pub const C_LINK: Color = Color::Rgb(110, 180, 160);
pub const C_SELECTION_BG: Color = Color::Rgb(30, 34, 46);

// ── Chrome ────────────────────────────────────────────────────────────────────

pub const C_PANE_BORDER: Color = Color::Rgb(96, 88, 180);
pub const C_PROGRESS: Color = Color::Rgb(110, 180, 160);
pub const C_INFO: Color = Color::Rgb(120, 170, 230);
pub const C_SUCCESS: Color = Color::Rgb(110, 200, 130);

pub fn style_selected_card() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn style_pane_border() -> Style {
    Style::default().fg(C_PANE_BORDER)
}
