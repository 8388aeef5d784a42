//! Channel list: the ordered, filterable, scrollable view over conversations.
//!
//! [`ChannelList`] is the source of truth for every conversation the chat
//! service has reported, and it owns the navigation state drawn on top of it:
//! the selected channel, the scroll offset of the viewport and the row the
//! cursor sits on.
//!
//! # Layers
//!
//! ```text
//! records (store order) ──▶ visible list ──▶ cursor / viewport window
//!                              ▲
//!               unread-only filter + search flags
//! ```
//!
//! - **Store** (this file): `set_channels` replaces records wholesale,
//!   `mark_read`/`mark_unread`/`set_presence` patch them in place.
//! - **Filter** (this file): the visible list is derived on every query. With
//!   unread-only mode off it is the whole store; with it on, only the selected
//!   record, records with unread activity and search matches remain.
//! - **Cursor** ([`cursor`]): selection, scroll offset and cursor row.
//! - **Search** ([`search`]): fuzzy matching that tags records as results.
//!
//! # Invariants
//!
//! Every public mutation ends by reconciling the cursor, so after any call:
//!
//! 1. With records present and unread-only mode off, the selection resolves
//!    to an existing record.
//! 2. The selected record is part of the visible list.
//! 3. `viewport_offset` lies in `[0, max(0, visible - viewport_height)]`.
//! 4. Only the latest search's matches carry the search flag.
//!
//! # Example
//!
//! ```
//! use chatterm::app::ChannelList;
//! use chatterm::domain::{ChannelKind, ChannelRecord};
//!
//! let mut list = ChannelList::new(5, false);
//! list.set_channels(vec![
//!     ChannelRecord::new("C1", "general", ChannelKind::Channel),
//!     ChannelRecord::new("C2", "random", ChannelKind::Channel).unread(),
//! ]);
//!
//! assert_eq!(list.selected().map(|c| c.name.as_str()), Some("general"));
//! assert!(list.move_down());
//! assert_eq!(list.selected_id(), Some("C2"));
//! ```

mod cursor;
mod search;

use crate::domain::{ChannelRecord, Presence};
use std::collections::HashSet;

/// Ordered channel store with filtering, cursor and search state.
#[derive(Debug, Clone, Default)]
pub struct ChannelList {
    /// All known channels in the order the service supplied them.
    records: Vec<ChannelRecord>,

    /// When set, read channels are hidden unless selected or matched.
    unread_only: bool,

    /// Weak reference to the selected record. Re-validated before every use.
    selected_id: Option<String>,

    /// Index into the visible list of the first rendered row.
    viewport_offset: usize,

    /// Viewport-relative row of the selected record.
    cursor_row: usize,

    /// Number of rows the list occupies on screen.
    viewport_height: usize,

    /// Index into the current search results.
    search_cursor: usize,

    /// Query that produced the live search flags, empty when none.
    search_term: String,
}

impl ChannelList {
    /// Creates an empty list rendering into `viewport_height` rows.
    #[must_use]
    pub fn new(viewport_height: usize, unread_only: bool) -> Self {
        Self {
            viewport_height,
            unread_only,
            ..Self::default()
        }
    }

    /// Replaces every record with `channels`.
    ///
    /// Search flags survive only for ids that are still present. With
    /// unread-only mode off the first record becomes the selection; with it
    /// on, the previous selection is kept if it still exists.
    ///
    /// # Parameters
    ///
    /// * `channels` - The full channel list in display order, as the service
    ///   reported it; incoming `is_search_match` values are ignored
    pub fn set_channels(&mut self, channels: Vec<ChannelRecord>) {
        let _span = tracing::debug_span!(
            "set_channels",
            previous = self.records.len(),
            incoming = channels.len(),
            unread_only = self.unread_only
        )
        .entered();

        let matched: HashSet<String> = self
            .records
            .iter()
            .filter(|record| record.is_search_match)
            .map(|record| record.id.clone())
            .collect();

        self.records = channels;
        for record in &mut self.records {
            record.is_search_match = matched.contains(&record.id);
        }

        if !self.unread_only {
            self.selected_id = self.records.first().map(|record| record.id.clone());
            self.viewport_offset = 0;
        }

        self.relocate_cursor();

        tracing::debug!(
            selected = ?self.selected_id,
            surviving_matches = self.records.iter().filter(|r| r.is_search_match).count(),
            "channel list replaced"
        );
    }

    /// Clears the unread flag of a channel.
    ///
    /// In unread-only mode the channel drops out of the visible list unless it
    /// is selected or matched by the search.
    ///
    /// # Returns
    ///
    /// - `true` if the channel exists
    /// - `false` for unknown ids, leaving every record untouched
    pub fn mark_read(&mut self, channel_id: &str) -> bool {
        self.patch(channel_id, |record| record.has_unread = false)
    }

    /// Sets the unread flag of a channel. Returns `false` for unknown ids.
    pub fn mark_unread(&mut self, channel_id: &str) -> bool {
        self.patch(channel_id, |record| record.has_unread = true)
    }

    /// Updates the presence of a channel. Returns `false` for unknown ids.
    pub fn set_presence(&mut self, channel_id: &str, presence: Presence) -> bool {
        self.patch(channel_id, |record| record.presence = presence)
    }

    fn patch(&mut self, channel_id: &str, apply: impl FnOnce(&mut ChannelRecord)) -> bool {
        let Some(index) = self.find_by_id(channel_id) else {
            tracing::debug!(channel_id, "ignoring update for unknown channel");
            return false;
        };

        apply(&mut self.records[index]);
        self.relocate_cursor();
        true
    }

    /// Index of a channel in store order, visible or not.
    #[must_use]
    pub fn find_by_id(&self, channel_id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == channel_id)
    }

    /// Looks a channel up in the visible list only.
    #[must_use]
    pub fn find_visible_by_id(&self, channel_id: &str) -> Option<&ChannelRecord> {
        self.visible().find(|record| record.id == channel_id)
    }

    /// Channels eligible for display under the current filter, in store order.
    #[must_use]
    pub fn list_visible(&self) -> Vec<&ChannelRecord> {
        self.visible().collect()
    }

    /// Visible channels flagged by the live search, in store order.
    #[must_use]
    pub fn list_search_results(&self) -> Vec<&ChannelRecord> {
        self.visible().filter(|record| record.is_search_match).collect()
    }

    fn visible(&self) -> impl Iterator<Item = &ChannelRecord> + '_ {
        self.records.iter().filter(move |record| self.is_visible(record))
    }

    fn is_visible(&self, record: &ChannelRecord) -> bool {
        !self.unread_only
            || record.has_unread
            || record.is_search_match
            || self.selected_id.as_deref() == Some(record.id.as_str())
    }

    pub(crate) fn visible_len(&self) -> usize {
        self.visible().count()
    }

    /// Position of a channel within the visible list.
    pub(crate) fn visible_position(&self, channel_id: &str) -> Option<usize> {
        self.visible().position(|record| record.id == channel_id)
    }

    /// Enables or disables unread-only filtering.
    pub fn set_unread_only(&mut self, unread_only: bool) {
        tracing::debug!(unread_only, "changing unread-only filter");
        self.unread_only = unread_only;
        self.relocate_cursor();
    }

    /// Flips unread-only filtering and returns the new setting.
    pub fn toggle_unread_only(&mut self) -> bool {
        self.set_unread_only(!self.unread_only);
        self.unread_only
    }

    #[must_use]
    pub const fn unread_only(&self) -> bool {
        self.unread_only
    }

    /// Number of channels with unread activity, visible or not.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|record| record.has_unread).count()
    }

    #[must_use]
    pub fn records(&self) -> &[ChannelRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::ChannelKind;

    /// `count` read channels named `chan-0`, `chan-1`, ... with ids `C0`, `C1`, ...
    pub(crate) fn numbered(count: usize) -> Vec<ChannelRecord> {
        (0..count)
            .map(|i| ChannelRecord::new(format!("C{i}"), format!("chan-{i}"), ChannelKind::Channel))
            .collect()
    }

    pub(crate) fn named(names: &[&str]) -> Vec<ChannelRecord> {
        names
            .iter()
            .map(|name| ChannelRecord::new(format!("id-{name}"), *name, ChannelKind::Channel))
            .collect()
    }

    fn visible_names(list: &ChannelList) -> Vec<&str> {
        list.list_visible().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn set_channels_selects_first_record() {
        let mut list = ChannelList::new(5, false);
        list.set_channels(numbered(3));

        assert_eq!(list.selected_id(), Some("C0"));
        assert_eq!(list.viewport_offset(), 0);
        assert_eq!(list.cursor_row(), 0);
    }

    #[test]
    fn set_channels_resets_selection_even_when_previous_survives() {
        let mut list = ChannelList::new(5, false);
        list.set_channels(numbered(3));
        assert!(list.set_selected("C2"));

        list.set_channels(numbered(4));
        assert_eq!(list.selected_id(), Some("C0"));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut list = ChannelList::new(5, false);
        list.set_channels(vec![]);

        assert!(list.selected().is_none());
        assert!(list.list_visible().is_empty());
        assert!(list.list_search_results().is_empty());
        assert!(!list.move_down());
        assert!(!list.move_up());
        assert_eq!(list.viewport_offset(), 0);
    }

    #[test]
    fn unread_only_keeps_selected_channel_pinned() {
        let mut list = ChannelList::new(5, false);
        let mut channels = named(&["a", "b", "c"]);
        channels[1].has_unread = true;
        list.set_channels(channels);
        assert_eq!(list.selected_id(), Some("id-a"));

        list.set_unread_only(true);

        assert_eq!(visible_names(&list), vec!["a", "b"]);
    }

    #[test]
    fn marking_read_hides_channel_in_unread_only_mode() {
        let mut list = ChannelList::new(5, false);
        let mut channels = named(&["a", "b", "c"]);
        channels[1].has_unread = true;
        channels[2].has_unread = true;
        list.set_channels(channels);
        list.set_unread_only(true);

        assert!(list.mark_read("id-c"));
        assert_eq!(visible_names(&list), vec!["a", "b"]);
        assert_eq!(list.find_visible_by_id("id-c"), None);
        assert!(list.find_by_id("id-c").is_some());
    }

    #[test]
    fn unread_only_without_selection_picks_first_unread() {
        let mut list = ChannelList::new(5, true);
        let mut channels = named(&["a", "b", "c"]);
        channels[2].has_unread = true;
        list.set_channels(channels);

        assert_eq!(list.selected_id(), Some("id-c"));
        assert_eq!(visible_names(&list), vec!["c"]);
    }

    #[test]
    fn unread_only_with_nothing_unread_leaves_selection_unset() {
        let mut list = ChannelList::new(5, true);
        list.set_channels(named(&["a", "b"]));

        assert!(list.selected().is_none());
        assert!(list.list_visible().is_empty());
    }

    #[test]
    fn unread_only_drops_selection_that_disappeared() {
        let mut list = ChannelList::new(5, false);
        let mut channels = named(&["a", "b"]);
        channels[1].has_unread = true;
        list.set_channels(channels);
        list.set_unread_only(true);

        let mut replacement = named(&["b", "c"]);
        replacement[0].has_unread = true;
        list.set_channels(replacement);

        assert_eq!(list.selected_id(), Some("id-b"));
    }

    #[test]
    fn updates_for_unknown_ids_are_rejected() {
        let mut list = ChannelList::new(5, false);
        list.set_channels(numbered(2));

        assert!(!list.mark_read("nope"));
        assert!(!list.mark_unread("nope"));
        assert!(!list.set_presence("nope", Presence::Away));
        assert_eq!(list.unread_count(), 0);
    }

    #[test]
    fn presence_and_unread_patch_in_place() {
        let mut list = ChannelList::new(5, false);
        list.set_channels(vec![ChannelRecord::new("D1", "alice", ChannelKind::DirectMessage)]);

        assert!(list.set_presence("D1", Presence::Away));
        assert!(list.mark_unread("D1"));

        let record = &list.records()[0];
        assert_eq!(record.presence, Presence::Away);
        assert!(record.has_unread);
        assert_eq!(list.unread_count(), 1);
    }

    #[test]
    fn search_flags_survive_refresh_only_for_known_ids() {
        let mut list = ChannelList::new(5, false);
        list.set_channels(named(&["general", "genesis", "random"]));
        assert_eq!(list.search("gen"), 2);

        list.set_channels(named(&["genesis", "random", "generic"]));

        let matches: Vec<&str> = list
            .list_search_results()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(matches, vec!["genesis"]);
    }

    #[test]
    fn toggle_reports_new_setting() {
        let mut list = ChannelList::new(5, false);
        assert!(list.toggle_unread_only());
        assert!(list.unread_only());
        assert!(!list.toggle_unread_only());
    }
}
