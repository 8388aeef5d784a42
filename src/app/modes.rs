//! Input mode state types.
//!
//! The mode decides how keys are interpreted and which input bar, if any, is
//! drawn above the channel list.
//!
//! ```text
//!            '/'                     Enter
//!  Normal ─────────▶ Search(Typing) ───────▶ Search(Navigating)
//!    ▲  │                 ▲                        │
//!    │  │ ':'             └────────── '/' ─────────┘
//!    │  ▼
//!    └─ Command            (Esc returns to Normal from anywhere)
//! ```
//!
//! # Example
//!
//! ```rust
//! use chatterm::app::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.accepts_text());
//! assert!(!InputMode::Normal.accepts_text());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Typing the query; every keystroke re-runs the search.
    Typing,

    /// Cycling through results with n/N while the query stays put.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Channel navigation with single-key bindings.
    #[default]
    Normal,

    /// Fuzzy channel search.
    Search(SearchFocus),

    /// Typing a message or slash command for the selected channel.
    Command,
}

impl InputMode {
    /// Whether printable keys edit a text buffer instead of acting as bindings.
    #[must_use]
    pub const fn accepts_text(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing) | Self::Command)
    }
}
