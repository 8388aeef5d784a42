//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the channel list
//! with its cursor and search state, the active input mode, the text buffers of
//! the search and command bars, the theme and the latest status message.
//!
//! # Layout
//!
//! The list viewport gets whatever the chrome leaves over:
//!
//! ```text
//! row 1        blank
//! row 2        header
//! row 3        border
//! rows 4..6    input bar (search and command modes only)
//! ...          channel list viewport
//! rows-2       border
//! rows-1       status line
//! rows         footer
//! ```
//!
//! The plugin calls [`AppState::fit_viewport`] with the pane height before each
//! render so the list scrolls against the real number of rows.
//!
//! # Example
//!
//! ```rust
//! use chatterm::app::{AppState, ChannelList};
//! use chatterm::domain::{ChannelKind, ChannelRecord};
//! use chatterm::ui::Theme;
//!
//! let mut state = AppState::new(ChannelList::new(1, false), Theme::default());
//! state.channels.set_channels(vec![
//!     ChannelRecord::new("C1", "general", ChannelKind::Channel),
//! ]);
//! state.fit_viewport(24);
//!
//! let vm = state.compute_viewmodel(24, 40);
//! assert_eq!(vm.rows.len(), 1);
//! assert!(vm.rows[0].is_cursor);
//! ```

use super::channels::ChannelList;
use super::modes::{InputMode, SearchFocus};
use crate::domain::{ChannelKind, ChannelRecord};
use crate::ui::helpers::fit_to_width;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ChannelRow, EmptyState, FooterInfo, HeaderInfo, InputBarInfo, StatusLine, UIViewModel,
};
use chrono::{DateTime, Utc};

/// Rows taken by blank line, header, two borders, status line and footer.
const BASE_CHROME_ROWS: usize = 6;

/// Rows taken by the boxed input bar.
const INPUT_BAR_ROWS: usize = 3;

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// A transient message shown above the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub at: DateTime<Utc>,
}

impl StatusMessage {
    #[must_use]
    pub fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level,
            at: Utc::now(),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Channel store, filter, cursor and search state.
    pub channels: ChannelList,

    /// Decides how keys are interpreted and which input bar is drawn.
    pub input_mode: InputMode,

    /// Text typed into the search bar.
    pub search_query: String,

    /// Text typed into the command bar.
    pub command_input: String,

    pub theme: Theme,

    /// Latest status message, replaced by the next one.
    pub status: Option<StatusMessage>,
}

impl AppState {
    /// Creates a state in normal mode around an existing channel list.
    #[must_use]
    pub fn new(channels: ChannelList, theme: Theme) -> Self {
        Self {
            channels,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            command_input: String::new(),
            theme,
            status: None,
        }
    }

    /// Records an informational status message.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(StatusLevel::Info, text));
    }

    /// Records an error status message.
    pub fn report_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!(message = %text, "status error");
        self.status = Some(StatusMessage::new(StatusLevel::Error, text));
    }

    /// Resizes the list viewport to the rows left after chrome in a pane of
    /// `rows` lines.
    pub fn fit_viewport(&mut self, rows: usize) {
        let height = self.available_rows(rows);
        if height != self.channels.viewport_height() {
            tracing::debug!(rows, height, "fitting list viewport");
            self.channels.resize(height);
        }
    }

    /// Rows available to the channel list for the current mode.
    #[must_use]
    pub const fn available_rows(&self, total_rows: usize) -> usize {
        let chrome = match self.input_mode {
            InputMode::Normal => BASE_CHROME_ROWS,
            InputMode::Search(_) | InputMode::Command => BASE_CHROME_ROWS + INPUT_BAR_ROWS,
        };
        total_rows.saturating_sub(chrome)
    }

    /// Computes a renderable view model for a pane of `rows` by `cols`.
    ///
    /// Rows come from the channel list's current window, starting at its
    /// viewport offset. Each row is clipped or padded to `cols` display
    /// columns.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::debug_span!(
            "compute_viewmodel",
            rows,
            cols,
            channels = self.channels.len()
        )
        .entered();

        let visible = self.channels.list_visible();
        let height = self
            .channels
            .viewport_height()
            .min(self.available_rows(rows));
        let selected_id = self.channels.selected_id();

        let channel_rows: Vec<ChannelRow> = visible
            .iter()
            .skip(self.channels.viewport_offset())
            .take(height)
            .map(|record| {
                let is_cursor = selected_id == Some(record.id.as_str());
                self.compute_channel_row(record, is_cursor, cols)
            })
            .collect();

        UIViewModel {
            rows: channel_rows,
            header: self.compute_header(visible.len()),
            footer: self.compute_footer(),
            input_bar: self.compute_input_bar(),
            status: self.compute_status(),
            empty_state: self.compute_empty_state(visible.is_empty()),
        }
    }

    fn compute_channel_row(&self, record: &ChannelRecord, is_cursor: bool, cols: usize) -> ChannelRow {
        let label = record.label();
        let (text, kept) = fit_to_width(&label, cols);

        let highlight_ranges = if record.is_search_match {
            let name_start = label.chars().count() - record.name.chars().count();
            let indices: Vec<usize> = self
                .channels
                .highlight_indices(&record.name)
                .into_iter()
                .map(|idx| idx + name_start)
                .filter(|&idx| idx < kept)
                .collect();
            coalesce_ranges(&indices)
        } else {
            vec![]
        };

        ChannelRow {
            text,
            is_cursor,
            has_unread: record.has_unread,
            presence: (record.kind == ChannelKind::DirectMessage).then_some(record.presence),
            highlight_ranges,
        }
    }

    fn compute_header(&self, visible: usize) -> HeaderInfo {
        let badge = self.channels.unread_only().then(|| {
            format!(" unread {} ", self.channels.unread_count())
        });

        HeaderInfo {
            title: format!(" Conversations ({visible}) "),
            badge,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal if !self.channels.list_search_results().is_empty() => {
                "j/k: navigate  n/N: next/prev result  Enter: open  ESC: clear search  /: search  q: quit"
            }
            InputMode::Normal => {
                "j/k: navigate  g/G: top/bottom  Enter: open  u: unread only  Tab: next unread  /: search  :: message  q: quit"
            }
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: exit search  Enter: browse results  Type to search"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: exit search  n/N: next/prev  /: edit query  Enter: open"
            }
            InputMode::Command => "ESC: cancel  Enter: send  /edit /delete /thread /search /unread /jump",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_input_bar(&self) -> Option<InputBarInfo> {
        match self.input_mode {
            InputMode::Normal => None,
            InputMode::Search(_) => {
                let hint = (!self.channels.search_term().is_empty()).then(|| {
                    let matches = self.channels.list_search_results().len();
                    format!("{} / {matches}", (self.channels.search_cursor() + 1).min(matches))
                });

                Some(InputBarInfo {
                    label: "Search".to_string(),
                    text: self.search_query.clone(),
                    hint,
                })
            }
            InputMode::Command => Some(InputBarInfo {
                label: self
                    .channels
                    .selected()
                    .map_or_else(|| "Message".to_string(), |c| format!("To {}", c.title())),
                text: self.command_input.clone(),
                hint: None,
            }),
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        self.status.as_ref().map(|status| StatusLine {
            text: format!("{} {}", status.at.format("%H:%M:%S"), status.text),
            is_error: status.level == StatusLevel::Error,
        })
    }

    fn compute_empty_state(&self, nothing_visible: bool) -> Option<EmptyState> {
        if self.channels.is_empty() {
            Some(EmptyState {
                message: "No conversations yet".to_string(),
                subtitle: "Waiting for the chat service".to_string(),
            })
        } else if nothing_visible {
            Some(EmptyState {
                message: "No unread conversations".to_string(),
                subtitle: "Press u to show every channel".to_string(),
            })
        } else {
            None
        }
    }
}

/// Coalesces sorted character indices into `(start, end)` runs.
fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }

    ranges
}
