//! Cursor and scroll control for the channel list.
//!
//! Three pieces of state must agree at all times: the selected channel id, the
//! viewport offset (first visible-list index on screen) and the cursor row
//! (screen row of the selection, relative to the viewport top).
//!
//! Single steps scroll like a text editor: the window slides by one line only
//! when the cursor is already pinned against the top or bottom edge. Larger
//! jumps (top, bottom, search seeks) set the offset directly, and
//! [`ChannelList::relocate_cursor`] clamps whatever is left.

use super::ChannelList;
use crate::domain::ChannelRecord;

impl ChannelList {
    /// Reconciles selection, offset and cursor row with the visible list.
    ///
    /// Drops a selection whose record no longer exists, selects the first
    /// visible record when nothing is selected, then clamps the offset so the
    /// window stays inside the list and contains the selection. Calling it
    /// again without an intervening mutation changes nothing.
    pub fn relocate_cursor(&mut self) {
        let dangling = self
            .selected_id
            .as_deref()
            .is_some_and(|id| self.find_by_id(id).is_none());
        if dangling {
            tracing::debug!(channel_id = ?self.selected_id, "selected channel vanished");
            self.selected_id = None;
        }

        if self.selected_id.is_none() {
            let first = self.visible_id_at(0);
            if let Some(first) = first {
                self.selected_id = Some(first);
                self.viewport_offset = 0;
            }
        }

        let height = self.effective_height();
        let max_offset = self.visible_len().saturating_sub(height);
        self.viewport_offset = self.viewport_offset.min(max_offset);

        let Some(position) = self.selected_position() else {
            self.cursor_row = 0;
            return;
        };

        if position < self.viewport_offset {
            self.viewport_offset = position;
        } else if position >= self.viewport_offset + height {
            self.viewport_offset = position + 1 - height;
        }

        self.cursor_row = position - self.viewport_offset;
    }

    /// Selects the previous visible channel.
    ///
    /// When the cursor was on the top row of the viewport the window scrolls
    /// up by one line.
    ///
    /// # Returns
    ///
    /// - `true` if the selection moved
    /// - `false` at the top of the list or with nothing selected
    pub fn move_up(&mut self) -> bool {
        let Some(position) = self.selected_position() else {
            return false;
        };
        let Some(previous) = position
            .checked_sub(1)
            .and_then(|index| self.visible_id_at(index))
        else {
            return false;
        };

        let on_top_row = self.cursor_row == 0;
        self.selected_id = Some(previous);

        if on_top_row && self.viewport_offset > 0 {
            self.viewport_offset -= 1;
        }

        self.relocate_cursor();
        true
    }

    /// Selects the next visible channel.
    ///
    /// Returns `false` at the bottom of the list. When the cursor was on the
    /// bottom row of the viewport and channels remain below, the window
    /// scrolls down by one line.
    pub fn move_down(&mut self) -> bool {
        let Some(position) = self.selected_position() else {
            return false;
        };
        let Some(next) = self.visible_id_at(position + 1) else {
            return false;
        };

        let height = self.effective_height();
        let on_bottom_row = self.cursor_row + 1 >= height;
        self.selected_id = Some(next);

        if on_bottom_row && self.viewport_offset + height < self.visible_len() {
            self.viewport_offset += 1;
        }

        self.relocate_cursor();
        true
    }

    /// Selects the first visible channel and scrolls to the top.
    pub fn move_top(&mut self) {
        if let Some(first) = self.visible_id_at(0) {
            self.selected_id = Some(first);
        }

        self.viewport_offset = 0;
        self.relocate_cursor();
    }

    /// Selects the last visible channel and scrolls so it sits on the last row.
    pub fn move_bottom(&mut self) {
        let len = self.visible_len();
        let Some(last) = len.checked_sub(1).and_then(|index| self.visible_id_at(index)) else {
            return;
        };

        self.selected_id = Some(last);
        self.viewport_offset = len.saturating_sub(self.effective_height());
        self.relocate_cursor();
    }

    /// Jumps to the search result at `result_index`.
    ///
    /// If the result lies outside the rows `[offset, offset + height - 2]`, the
    /// window shifts by exactly the distance needed to bring it to the nearest
    /// edge of that range.
    ///
    /// # Parameters
    ///
    /// * `result_index` - Position within [`ChannelList::list_search_results`]
    ///
    /// # Returns
    ///
    /// - `true` if the result is now selected
    /// - `false` when there are no results or the index is out of range
    pub fn goto_position(&mut self, result_index: usize) -> bool {
        let Some(target) = self
            .list_search_results()
            .get(result_index)
            .map(|record| record.id.clone())
        else {
            tracing::debug!(result_index, "search position out of range");
            return false;
        };

        self.seek_to(target)
    }

    /// Selects a visible channel and shifts the window just enough to show it.
    pub(crate) fn seek_to(&mut self, channel_id: String) -> bool {
        // Selecting first: in unread-only mode the old selection may drop out
        // of the visible list and move every position after it.
        self.selected_id = Some(channel_id);
        let Some(position) = self.selected_position() else {
            self.relocate_cursor();
            return false;
        };

        let first_row = self.viewport_offset;
        let last_row = self.viewport_offset + self.effective_height().saturating_sub(2);

        if position < first_row {
            self.viewport_offset -= first_row - position;
        } else if position > last_row {
            self.viewport_offset += position - last_row;
        }

        self.relocate_cursor();
        true
    }

    /// Selects a channel by id, visible or not. Unknown ids are rejected.
    pub fn set_selected(&mut self, channel_id: &str) -> bool {
        if self.find_by_id(channel_id).is_none() {
            tracing::debug!(channel_id, "cannot select unknown channel");
            return false;
        }

        self.selected_id = Some(channel_id.to_string());
        self.relocate_cursor();
        true
    }

    /// The selected channel, if the selection still resolves to a record.
    #[must_use]
    pub fn selected(&self) -> Option<&ChannelRecord> {
        let id = self.selected_id.as_deref()?;
        self.find_by_id(id).map(|index| &self.records[index])
    }

    /// Id of the selected channel, if the selection still resolves.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(|record| record.id.as_str())
    }

    /// Changes the number of rows available to the list.
    ///
    /// The offset is re-clamped and the selection pulled back into view; a
    /// call with the current height changes nothing.
    ///
    /// # Parameters
    ///
    /// * `viewport_height` - Rows left for channels once the chrome is drawn
    pub fn resize(&mut self, viewport_height: usize) {
        if self.viewport_height != viewport_height {
            tracing::debug!(
                from = self.viewport_height,
                to = viewport_height,
                "channel viewport resized"
            );
            self.viewport_height = viewport_height;
            self.relocate_cursor();
        }
    }

    #[must_use]
    pub const fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    #[must_use]
    pub const fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    #[must_use]
    pub const fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Viewport height used for arithmetic; a zero-row viewport behaves as one row.
    pub(crate) fn effective_height(&self) -> usize {
        self.viewport_height.max(1)
    }

    pub(crate) fn selected_position(&self) -> Option<usize> {
        let id = self.selected_id.as_deref()?;
        self.visible_position(id)
    }

    fn visible_id_at(&self, index: usize) -> Option<String> {
        self.visible().nth(index).map(|record| record.id.clone())
    }
}
