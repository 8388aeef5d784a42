//! Composable UI component renderers.
//!
//! Each component prints one part of the pane at an explicit row and returns
//! the next free row, so [`render_layout`] can stack them top to bottom.
//!
//! # Components
//!
//! - [`header`]: title bar with conversation count and filter badge
//! - [`input_bar`]: boxed search or command input
//! - [`channel_list`]: the scrolled channel rows
//! - [`empty`]: message shown instead of the list when nothing is visible
//! - [`status`]: latest status message
//! - [`footer`]: keybinding hints

mod channel_list;
mod empty;
mod footer;
mod header;
mod input_bar;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use channel_list::render_channel_list;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use input_bar::render_input_bar;
use status::render_status;

/// Renders a horizontal border line. Returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole pane.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Input bar - 3 lines, search and command modes only]
/// [Channel rows or empty state, filling the viewport]
/// [Border]
/// [Status line]
/// [Footer]
/// ```
///
/// Panes too short for the chrome get whatever rows fit, top first.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(bar) = &vm.input_bar {
        current_row = render_input_bar(current_row, bar, theme, cols);
    }

    let footer_row = rows;
    let status_row = footer_row.saturating_sub(1);
    let border_row = status_row.saturating_sub(1);
    let height = border_row.saturating_sub(current_row);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, height, theme, cols);
    } else {
        render_channel_list(current_row, &vm.rows, height, theme, cols);
    }

    if border_row > current_row {
        render_border(border_row, &theme.colors.border, cols);
        render_status(status_row, vm.status.as_ref(), theme, cols);
        render_footer(footer_row, &vm.footer, theme, cols);
    }
}
