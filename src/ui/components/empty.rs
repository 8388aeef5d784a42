//! Empty state renderer.

use crate::ui::helpers::{centered, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message and subtitle centered inside a viewport of
/// `height` rows starting at `row`, blanking the remaining rows.
///
/// Returns the row after the viewport.
pub fn render_empty_state(row: usize, empty: &EmptyState, height: usize, theme: &Theme, cols: usize) -> usize {
    let message_row = row + height.saturating_sub(2) / 2;

    for current in row..row + height {
        position_cursor(current, 1);
        if current == message_row {
            print!("{}", Theme::fg(&theme.colors.empty_state_fg));
            print!("{}", centered(&empty.message, cols));
        } else if current == message_row + 1 {
            print!("{}", Theme::dim());
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!("{}", centered(&empty.subtitle, cols));
        } else {
            print!("{}", " ".repeat(cols));
        }
        print!("{}", Theme::reset());
    }

    row + height
}
