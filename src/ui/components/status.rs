//! Status line renderer.

use crate::ui::helpers::{fit_to_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the latest status message, or a blank line when there is none.
///
/// Errors use the theme's error color; everything else is dimmed.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = if status.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.text_dim
    };

    print!("{}", Theme::fg(color));
    print!("{}", fit_to_width(&format!(" {}", status.text), cols).0);
    print!("{}", Theme::reset());
    row + 1
}
