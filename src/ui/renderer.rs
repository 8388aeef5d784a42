//! Top-level rendering coordinator.
//!
//! Computes the view model from [`AppState`] and hands it to the components.
//! The plugin resizes the list viewport with
//! [`AppState::fit_viewport`](crate::app::AppState::fit_viewport) before calling
//! [`render`], so the rows drawn here match the window the cursor logic scrolls.
//!
//! # Example
//!
//! ```rust
//! use chatterm::app::{AppState, ChannelList};
//! use chatterm::ui::{render, Theme};
//!
//! let mut state = AppState::new(ChannelList::new(0, false), Theme::default());
//! state.fit_viewport(24);
//! render(&state, 24, 80);
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a pane of `rows` by `cols`.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
