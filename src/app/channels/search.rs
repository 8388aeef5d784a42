//! Fuzzy channel search.
//!
//! Search results are a flag on each record rather than a separate list, so a
//! search composes with unread-only filtering: a matching channel is always
//! visible regardless of its read state. Results keep store order; match
//! quality only decides membership.

use super::ChannelList;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

fn matcher() -> SkimMatcherV2 {
    SkimMatcherV2::default().ignore_case()
}

impl ChannelList {
    /// Flags every channel whose name fuzzily matches `term`.
    ///
    /// Previous flags are cleared first. When anything matches, the first
    /// result is selected and the search cursor resets to it. An empty (or
    /// whitespace-only) term clears the search and matches nothing.
    ///
    /// # Parameters
    ///
    /// * `term` - Fuzzy query matched case-insensitively against channel names
    ///
    /// # Returns
    ///
    /// The number of matching channels, visible or not before the search.
    ///
    /// # Example
    ///
    /// ```
    /// use chatterm::app::ChannelList;
    /// use chatterm::domain::{ChannelKind, ChannelRecord};
    ///
    /// let mut list = ChannelList::new(10, false);
    /// list.set_channels(
    ///     ["general", "random", "genesis"]
    ///         .iter()
    ///         .map(|name| ChannelRecord::new(*name, *name, ChannelKind::Channel))
    ///         .collect(),
    /// );
    ///
    /// assert_eq!(list.search("gen"), 2);
    /// assert!(list.search_next());
    /// assert_eq!(list.selected_id(), Some("genesis"));
    /// ```
    pub fn search(&mut self, term: &str) -> usize {
        let term = term.trim();
        let _span = tracing::debug_span!(
            "search_channels",
            term_len = term.len(),
            channels = self.records.len()
        )
        .entered();

        if term.is_empty() {
            self.clear_search();
            return 0;
        }

        let matcher = matcher();
        let mut count = 0;
        for record in &mut self.records {
            record.is_search_match = matcher.fuzzy_match(&record.name, term).is_some();
            if record.is_search_match {
                count += 1;
            }
        }

        self.search_term = term.to_string();

        if count > 0 {
            self.search_cursor = 0;
            self.goto_position(0);
        } else {
            self.relocate_cursor();
        }

        tracing::debug!(matches = count, "search completed");
        count
    }

    /// Moves to the next search result. State is untouched when there is none.
    ///
    /// # Returns
    ///
    /// - `true` if the selection moved to the next result
    /// - `false` at the last result or when nothing matched
    pub fn search_next(&mut self) -> bool {
        let next = self.search_cursor + 1;
        if self.goto_position(next) {
            self.search_cursor = next;
            true
        } else {
            false
        }
    }

    /// Moves to the previous search result. State is untouched when there is none.
    pub fn search_prev(&mut self) -> bool {
        let Some(previous) = self.search_cursor.checked_sub(1) else {
            return false;
        };

        if self.goto_position(previous) {
            self.search_cursor = previous;
            true
        } else {
            false
        }
    }

    /// Jumps back to the first search result and rewinds the search cursor.
    pub fn jump_to_first_result(&mut self) -> bool {
        if self.goto_position(0) {
            self.search_cursor = 0;
            true
        } else {
            false
        }
    }

    /// Jumps to the first visible channel with unread activity.
    ///
    /// Uses the same window shift as search navigation but leaves the search
    /// cursor alone, so unread jumps and result cycling do not interfere.
    pub fn jump_to_first_unread(&mut self) -> bool {
        let Some(target) = self
            .visible()
            .find(|record| record.has_unread)
            .map(|record| record.id.clone())
        else {
            tracing::debug!("no unread channel to jump to");
            return false;
        };

        self.seek_to(target)
    }

    /// Removes every search flag and forgets the query.
    pub fn clear_search(&mut self) {
        for record in &mut self.records {
            record.is_search_match = false;
        }
        self.search_term.clear();
        self.search_cursor = 0;
        self.relocate_cursor();
    }

    /// Character indices of `text` matched by the live search term.
    ///
    /// # Parameters
    ///
    /// * `text` - Usually a channel name; indices count `char`s, not bytes
    ///
    /// # Returns
    ///
    /// Sorted indices, or an empty vector when no search is active or `text`
    /// does not match.
    ///
    /// # Example
    ///
    /// ```
    /// use chatterm::app::ChannelList;
    /// use chatterm::domain::{ChannelKind, ChannelRecord};
    ///
    /// let mut list = ChannelList::new(5, false);
    /// list.set_channels(vec![ChannelRecord::new("C1", "general", ChannelKind::Channel)]);
    /// list.search("gen");
    ///
    /// assert_eq!(list.highlight_indices("general"), vec![0, 1, 2]);
    /// ```
    #[must_use]
    pub fn highlight_indices(&self, text: &str) -> Vec<usize> {
        if self.search_term.is_empty() {
            return Vec::new();
        }

        matcher()
            .fuzzy_indices(text, &self.search_term)
            .map(|(_score, indices)| indices)
            .unwrap_or_default()
    }

    /// Index of the selected result within the search results.
    #[must_use]
    pub const fn search_cursor(&self) -> usize {
        self.search_cursor
    }

    /// Query behind the live search flags; empty when no search is active.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{named, numbered};
    use super::*;

    fn result_names(list: &ChannelList) -> Vec<&str> {
        list.list_search_results()
            .iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    #[test]
    fn search_round_trip() {
        let mut list = ChannelList::new(10, false);
        list.set_channels(named(&["general", "random", "genesis"]));
        list.move_bottom();

        assert_eq!(list.search("gen"), 2);
        assert_eq!(result_names(&list), vec!["general", "genesis"]);
        assert_eq!(list.selected_id(), Some("id-general"));
        assert_eq!(list.search_cursor(), 0);

        assert!(list.search_next());
        assert_eq!(list.selected_id(), Some("id-genesis"));
        assert_eq!(list.search_cursor(), 1);
        assert_eq!(result_names(&list), vec!["general", "genesis"]);

        assert!(!list.search_next());
        assert_eq!(list.search_cursor(), 1);

        assert!(list.search_prev());
        assert_eq!(list.search_cursor(), 0);
        assert!(!list.search_prev());
        assert_eq!(list.search_cursor(), 0);
        assert_eq!(list.selected_id(), Some("id-general"));
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut list = ChannelList::new(10, false);
        list.set_channels(named(&["Dev-Ops", "design"]));

        assert_eq!(list.search("DEVOPS"), 1);
        assert_eq!(list.selected_id(), Some("id-Dev-Ops"));
    }

    #[test]
    fn new_search_replaces_previous_matches() {
        let mut list = ChannelList::new(10, false);
        list.set_channels(named(&["general", "random", "genesis"]));

        list.search("gen");
        assert_eq!(list.search("rand"), 1);
        assert_eq!(result_names(&list), vec!["random"]);
    }

    #[test]
    fn search_without_matches_keeps_selection() {
        let mut list = ChannelList::new(10, false);
        list.set_channels(named(&["general", "random"]));
        list.move_down();

        assert_eq!(list.search("zzz"), 0);
        assert_eq!(list.selected_id(), Some("id-random"));
        assert!(list.list_search_results().is_empty());
    }

    #[test]
    fn failed_search_leaves_search_cursor() {
        let mut list = ChannelList::new(10, false);
        list.set_channels(named(&["general", "random", "genesis"]));
        assert_eq!(list.search("gen"), 2);
        assert!(list.search_next());
        assert_eq!(list.search_cursor(), 1);

        assert_eq!(list.search("zzz"), 0);
        assert_eq!(list.search_cursor(), 1);
    }

    #[test]
    fn empty_term_clears_search() {
        let mut list = ChannelList::new(10, false);
        list.set_channels(named(&["general", "random"]));
        list.search("gen");

        assert_eq!(list.search("   "), 0);
        assert!(list.list_search_results().is_empty());
        assert_eq!(list.search_term(), "");
    }

    #[test]
    fn matches_stay_visible_in_unread_only_mode() {
        let mut list = ChannelList::new(10, true);
        let mut channels = named(&["general", "random", "genesis"]);
        channels[1].has_unread = true;
        list.set_channels(channels);
        assert_eq!(list.selected_id(), Some("id-random"));

        assert_eq!(list.search("genesis"), 1);
        let visible: Vec<&str> = list.list_visible().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(visible, vec!["random", "genesis"]);
        assert_eq!(list.selected_id(), Some("id-genesis"));
    }

    #[test]
    fn unread_jump_leaves_search_cursor_alone() {
        let mut list = ChannelList::new(5, false);
        let mut channels = numbered(10);
        channels[8].has_unread = true;
        list.set_channels(channels);

        assert_eq!(list.search("chan"), 10);
        assert!(list.search_next());
        assert!(list.search_next());
        assert_eq!(list.search_cursor(), 2);

        assert!(list.jump_to_first_unread());
        assert_eq!(list.selected_id(), Some("C8"));
        assert_eq!(list.search_cursor(), 2);
        assert_eq!(list.viewport_offset(), 5);
    }

    #[test]
    fn unread_jump_without_unread_fails() {
        let mut list = ChannelList::new(5, false);
        list.set_channels(numbered(3));
        assert!(!list.jump_to_first_unread());
    }

    #[test]
    fn jump_to_first_result_rewinds_cursor() {
        let mut list = ChannelList::new(10, false);
        list.set_channels(named(&["general", "random", "genesis"]));
        list.search("gen");
        list.search_next();

        assert!(list.jump_to_first_result());
        assert_eq!(list.search_cursor(), 0);
        assert_eq!(list.selected_id(), Some("id-general"));
    }

    #[test]
    fn highlight_indices_follow_live_term() {
        let mut list = ChannelList::new(10, false);
        list.set_channels(named(&["general"]));
        assert!(list.highlight_indices("general").is_empty());

        list.search("gnr");
        assert_eq!(list.highlight_indices("general"), vec![0, 2, 4]);
    }
}
