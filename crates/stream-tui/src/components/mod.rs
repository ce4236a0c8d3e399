pub mod live_panel;
pub mod nav_bar;
pub mod schedule_panel;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Clip `text` to `max_width` terminal columns, ending in `…` when clipped.
/// Wide (CJK) characters count as two columns.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("karaoke", 10), "karaoke");
        assert_eq!(truncate_to_width("karaoke", 7), "karaoke");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        assert_eq!(truncate_to_width("karaoke night", 8), "karaoke…");
        assert_eq!(truncate_to_width("abc", 1), "…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn wide_characters_use_two_columns() {
        // Each kana is two columns wide.
        let clipped = truncate_to_width("うたわく配信", 7);
        assert_eq!(clipped, "うたわ…");
        assert!(clipped.width() <= 7);
    }
}
