//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used across components: cursor positioning, clipping text
//! to a display width, and printing text with fuzzy-match highlights.
//!
//! Widths are display columns as reported by `unicode-width`, so wide glyphs
//! (CJK, most emoji) count as two columns and combining marks as zero.
//!
//! # Example
//!
//! ```rust
//! use chatterm::ui::helpers::fit_to_width;
//!
//! let (line, kept) = fit_to_width("* # engineering", 10);
//! assert_eq!(line, "* # engin…");
//! assert_eq!(kept, 9);
//! ```

use crate::ui::theme::Theme;
use unicode_width::UnicodeWidthChar;

/// Marker appended to text that did not fit.
pub const TRUNCATION_MARKER: char = '…';

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Clips or pads `text` so it occupies exactly `width` display columns.
///
/// Text that overflows is cut at a character boundary and ends with
/// [`TRUNCATION_MARKER`]; shorter text is padded with spaces. A wide glyph that
/// would straddle the edge is dropped and its column filled with a space.
///
/// Returns the fitted line and how many characters of `text` it still holds,
/// which bounds any highlight ranges computed against the original text.
#[must_use]
pub fn fit_to_width(text: &str, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }

    let total: usize = text.chars().map(char_width).sum();
    if total <= width {
        let mut line = text.to_string();
        line.push_str(&" ".repeat(width - total));
        return (line, text.chars().count());
    }

    let budget = width - 1;
    let mut line = String::new();
    let mut used = 0;
    let mut kept = 0;
    for c in text.chars() {
        let w = char_width(c);
        if used + w > budget {
            break;
        }
        line.push(c);
        used += w;
        kept += 1;
    }

    line.push_str(&" ".repeat(budget - used));
    line.push(TRUNCATION_MARKER);
    (line, kept)
}

/// Centers `text` in a line of exactly `width` columns, clipping if needed.
///
/// Odd leftover space goes to the right.
#[must_use]
pub fn centered(text: &str, width: usize) -> String {
    let text_width: usize = text.chars().map(char_width).sum();
    if text_width >= width {
        return fit_to_width(text, width).0;
    }

    let left = (width - text_width) / 2;
    let mut line = " ".repeat(left);
    line.push_str(text);
    line.push_str(&" ".repeat(width - text_width - left));
    line
}

/// Display width of a single character; control characters count as zero.
fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Prints `text` with highlighted character ranges for fuzzy matches.
///
/// `base` is the escape sequence for the surrounding style; it is re-applied
/// after every highlighted section so the rest of the row keeps its colors.
/// Ranges are character indices with exclusive ends and are clamped to the
/// text.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}{base}", Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn short_text_is_padded() {
        let (line, kept) = fit_to_width("  # general", 15);
        assert_eq!(line, "  # general    ");
        assert_eq!(kept, 11);
    }

    #[test]
    fn exact_fit_is_untouched() {
        let (line, _) = fit_to_width("abcde", 5);
        assert_eq!(line, "abcde");
    }

    #[test]
    fn overflow_ends_with_marker() {
        let (line, kept) = fit_to_width("abcdefgh", 5);
        assert_eq!(line, "abcd…");
        assert_eq!(kept, 4);
        assert_eq!(line.width(), 5);
    }

    #[test]
    fn wide_glyph_at_edge_is_replaced_by_space() {
        // Each ideograph is two columns wide.
        let (line, kept) = fit_to_width("ab日本語", 6);
        assert_eq!(line, "ab日 …");
        assert_eq!(kept, 3);
        assert_eq!(line.width(), 6);
    }

    #[test]
    fn zero_width_yields_nothing() {
        assert_eq!(fit_to_width("abc", 0), (String::new(), 0));
    }

    #[test]
    fn centering_pads_both_sides() {
        assert_eq!(centered("ab", 7), "  ab   ");
        assert_eq!(centered("abcdef", 4), "abc…");
    }

    #[test]
    fn single_column_is_just_the_marker() {
        assert_eq!(fit_to_width("abc", 1), ("…".to_string(), 0));
    }
}
