//! Header component renderer.

use crate::ui::helpers::{centered, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar, centered, with the optional badge in the unread color.
///
/// Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let badge = header.badge.as_deref().unwrap_or_default();
    let line = centered(&format!("{}{badge}", header.title), cols);

    // The badge is the tail of the centered text; split there to color it.
    let (title_part, badge_part) = match line.rfind(badge) {
        Some(start) if !badge.is_empty() => line.split_at(start),
        _ => (line.as_str(), ""),
    };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{title_part}");

    if !badge_part.is_empty() {
        print!("{}", Theme::fg(&theme.colors.unread_fg));
        print!("{badge_part}");
    }

    print!("{}", Theme::reset());
    row + 1
}
