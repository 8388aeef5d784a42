//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) and hold
//! display-ready data only: rows are already clipped to the pane width and
//! highlight ranges already point into the clipped text. Components print them
//! without any further layout decisions.
//!
//! # Example
//!
//! ```rust
//! use chatterm::ui::viewmodel::{ChannelRow, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     rows: vec![ChannelRow {
//!         text: "  # general".to_string(),
//!         is_cursor: true,
//!         has_unread: false,
//!         presence: None,
//!         highlight_ranges: vec![],
//!     }],
//!     header: HeaderInfo { title: " Conversations (1) ".to_string(), badge: None },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     input_bar: None,
//!     status: None,
//!     empty_state: None,
//! };
//! assert_eq!(vm.rows.len(), 1);
//! ```

use crate::domain::Presence;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Rows of the list viewport, top to bottom. Never longer than the viewport.
    pub rows: Vec<ChannelRow>,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Search or command input box, when one of those modes is active.
    pub input_bar: Option<InputBarInfo>,

    /// Latest status message (command errors, service failures).
    pub status: Option<StatusLine>,

    /// Shown in place of the list when the store is empty or fully filtered.
    pub empty_state: Option<EmptyState>,
}

/// One rendered line of the channel list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRow {
    /// `marker icon name`, clipped or padded to exactly the pane width.
    pub text: String,

    /// Whether the selection cursor sits on this row.
    pub is_cursor: bool,

    pub has_unread: bool,

    /// Peer presence, for direct messages only.
    pub presence: Option<Presence>,

    /// Character ranges of `text` matched by the live search, `(start, end)`
    /// with exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Extra marker drawn after the title, e.g. ` unread `.
    pub badge: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding hints for the current mode.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// The boxed input line used by search and command modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBarInfo {
    /// Prompt in front of the text, e.g. `Search` or `Message`.
    pub label: String,

    pub text: String,

    /// Right-aligned hint, such as the match count.
    pub hint: Option<String>,
}

/// A status message ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// `HH:MM:SS message`.
    pub text: String,

    pub is_error: bool,
}
