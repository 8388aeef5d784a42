//! Boxed input line shared by search and command modes.
//!
//! ```text
//!      ┌──────────────────────────────────────┐
//!      │ Search: gen                     1 / 2│
//!      └──────────────────────────────────────┘
//! ```

use crate::ui::helpers::{fit_to_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBarInfo;
use unicode_width::UnicodeWidthStr;

const INPUT_BOX_MARGIN: usize = 5;

/// Renders the three-row input box. Returns the row after it.
///
/// The typed text keeps its tail visible when it is wider than the box, so
/// the insertion point stays on screen.
pub fn render_input_bar(row: usize, bar: &InputBarInfo, theme: &Theme, cols: usize) -> usize {
    let margin = if cols > INPUT_BOX_MARGIN * 2 + 10 {
        INPUT_BOX_MARGIN
    } else {
        0
    };
    let inner_width = cols.saturating_sub(margin * 2 + 2);

    let hint = bar.hint.as_deref().unwrap_or_default();
    let prompt = format!(" {}: ", bar.label);
    let text_room = inner_width.saturating_sub(prompt.width() + hint.width() + 1);
    let content = format!("{prompt}{}▏", visible_tail(&bar.text, text_room));
    let (content, _) = fit_to_width(&content, inner_width.saturating_sub(hint.width()));

    position_cursor(row, 1);
    print!("{}", " ".repeat(margin));
    print!("{}", Theme::fg(&theme.colors.input_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(margin));
    print!("{}", Theme::fg(&theme.colors.input_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{content}");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{hint}");
    print!("{}", Theme::fg(&theme.colors.input_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(margin));
    print!("{}", Theme::fg(&theme.colors.input_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// The longest suffix of `text` that fits in `width` columns.
fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::visible_tail;

    #[test]
    fn tail_keeps_the_end_of_long_input() {
        assert_eq!(visible_tail("hello world", 5), "world");
        assert_eq!(visible_tail("short", 10), "short");
        assert_eq!(visible_tail("日本語", 4), "本語");
        assert_eq!(visible_tail("abc", 0), "");
    }
}
