//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`AppState`] changes in response to
//! the outside world. It never performs I/O: requests to the chat service come
//! back as [`Action`]s for the plugin runtime to execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyUp`, `KeyDown`, `KeyTop`, `KeyBottom`, `SelectChannel`,
//!   `ToggleUnreadOnly`, `JumpToUnread`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `SubmitSearch`, `SearchNext`,
//!   `SearchPrev`, `ExitSearch`
//! - **Text input**: `Char`, `Backspace`, `Escape`, `CommandMode`, `SubmitCommand`
//! - **System**: `Resize`, `Refresh`, `CloseFocus`
//! - **Service**: `Service` wrapping a decoded [`ServiceEvent`]
//!
//! # Example
//!
//! ```rust
//! use chatterm::app::{handle_event, AppState, ChannelList, Event};
//! use chatterm::domain::{ChannelKind, ChannelRecord};
//! use chatterm::service::ServiceEvent;
//! use chatterm::ui::Theme;
//!
//! let mut state = AppState::new(ChannelList::new(5, false), Theme::default());
//! let loaded = ServiceEvent::ChannelsLoaded {
//!     channels: vec![
//!         ChannelRecord::new("C1", "general", ChannelKind::Channel),
//!         ChannelRecord::new("C2", "random", ChannelKind::Channel),
//!     ],
//! };
//!
//! handle_event(&mut state, &Event::Service(loaded))?;
//! let (render, _actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(render);
//! assert_eq!(state.channels.selected_id(), Some("C2"));
//! # Ok::<(), chatterm::ChatError>(())
//! ```

use super::commands::{self, SlashCommand};
use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState, ChannelList};
use crate::domain::error::Result;
use crate::service::{decode_events, ServiceEvent, ServiceRequest};

/// Events triggered by user input, the plugin runtime, or the chat service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection up one visible channel.
    KeyUp,
    /// Moves the selection down one visible channel.
    KeyDown,
    /// Selects the first visible channel.
    KeyTop,
    /// Selects the last visible channel.
    KeyBottom,
    /// Opens the selected channel, marking it read.
    SelectChannel,
    /// Flips unread-only filtering.
    ToggleUnreadOnly,
    /// Jumps to the first visible channel with unread activity.
    JumpToUnread,

    /// Enters search mode with an empty query.
    SearchMode,
    /// Returns focus to the search query from result navigation.
    FocusSearchBar,
    /// Leaves the query and starts cycling through results.
    SubmitSearch,
    /// Moves to the next search result.
    SearchNext,
    /// Moves to the previous search result.
    SearchPrev,
    /// Leaves search mode and clears every search flag.
    ExitSearch,

    /// Appends a character to the active text buffer.
    Char(char),
    /// Removes the last character from the active text buffer.
    Backspace,
    /// Leaves any input mode and discards typed text.
    Escape,

    /// Opens the command bar.
    CommandMode,
    /// Sends the command bar contents.
    SubmitCommand,

    /// The pane now has `rows` lines.
    Resize { rows: usize },
    /// Periodic request for a fresh channel list.
    Refresh,
    /// Hides the plugin pane.
    CloseFocus,

    /// An event decoded from the chat service.
    Service(ServiceEvent),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean tells the runtime whether the pane must be re-rendered.
///
/// # Errors
///
/// Command-bar mistakes and service failures are reported through the status
/// line rather than as errors, so every event handled today succeeds.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyUp => Ok((state.channels.move_up(), vec![])),
        Event::KeyDown => Ok((state.channels.move_down(), vec![])),
        Event::KeyTop => {
            state.channels.move_top();
            Ok((true, vec![]))
        }
        Event::KeyBottom => {
            state.channels.move_bottom();
            Ok((true, vec![]))
        }
        Event::SelectChannel => Ok(select_channel(state)),
        Event::ToggleUnreadOnly => {
            let unread_only = state.channels.toggle_unread_only();
            tracing::debug!(unread_only, "unread-only toggled");
            Ok((true, vec![]))
        }
        Event::JumpToUnread => {
            if !state.channels.jump_to_first_unread() {
                state.notify("No unread conversations");
            }
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            state.channels.clear_search();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            if state.search_query.trim().is_empty() {
                exit_input_mode(state);
                return Ok((true, vec![]));
            }

            if state.channels.list_search_results().is_empty() {
                state.notify(format!("No channels match '{}'", state.search_query.trim()));
                return Ok((true, vec![]));
            }

            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::SearchNext => Ok((step_search(state, ChannelList::search_next), vec![])),
        Event::SearchPrev => Ok((step_search(state, ChannelList::search_prev), vec![])),
        Event::ExitSearch | Event::Escape => {
            tracing::debug!(mode = ?state.input_mode, "leaving input mode");
            exit_input_mode(state);
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, "search query updated");
                state.channels.search(&state.search_query);
                Ok((true, vec![]))
            }
            InputMode::Command => {
                state.command_input.push(*c);
                Ok((true, vec![]))
            }
            InputMode::Normal | InputMode::Search(SearchFocus::Navigating) => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                state.search_query.pop();
                state.channels.search(&state.search_query);
                Ok((true, vec![]))
            }
            InputMode::Command => Ok((state.command_input.pop().is_some(), vec![])),
            InputMode::Normal | InputMode::Search(SearchFocus::Navigating) => Ok((false, vec![])),
        },
        Event::CommandMode => {
            state.input_mode = InputMode::Command;
            state.command_input.clear();
            Ok((true, vec![]))
        }
        Event::SubmitCommand => submit_command(state),
        Event::Resize { rows } => {
            state.fit_viewport(*rows);
            Ok((true, vec![]))
        }
        Event::Refresh => Ok((false, vec![Action::Request(ServiceRequest::list_channels())])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Service(service_event) => Ok(handle_service_event(state, service_event)),
    }
}

/// Turns chat service output into events, one per decodable line.
///
/// Used for both command stdout and `zellij pipe` payloads; lines that are not
/// valid events are logged and skipped.
///
/// # Example
///
/// ```rust
/// use chatterm::app::{service_events, Event};
/// use chatterm::service::ServiceEvent;
///
/// let events = service_events("{\"ChannelRead\":{\"channel_id\":\"C1\"}}\nnot json\n");
/// assert_eq!(
///     events,
///     vec![Event::Service(ServiceEvent::ChannelRead { channel_id: "C1".to_string() })]
/// );
/// ```
#[must_use]
pub fn service_events(payload: &str) -> Vec<Event> {
    decode_events(payload).into_iter().map(Event::Service).collect()
}

/// Opens the selected channel: marks it read locally and tells the service.
fn select_channel(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(channel_id) = state.channels.selected_id().map(str::to_string) else {
        tracing::debug!("no channel selected");
        return (false, vec![]);
    };

    if matches!(state.input_mode, InputMode::Search(_)) {
        // Results stay flagged so n/N keep cycling from normal mode.
        state.input_mode = InputMode::Normal;
        state.search_query.clear();
    }

    state.channels.mark_read(&channel_id);
    tracing::debug!(channel_id = %channel_id, "channel opened");

    (true, vec![Action::Request(ServiceRequest::mark_read(channel_id))])
}

/// Moves through the live search results, telling the user when there are none.
fn step_search(state: &mut AppState, step: fn(&mut ChannelList) -> bool) -> bool {
    if state.channels.list_search_results().is_empty() {
        state.notify("No search results");
        return true;
    }
    step(&mut state.channels)
}

/// Returns to normal mode, dropping typed text and search flags.
fn exit_input_mode(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    state.search_query.clear();
    state.command_input.clear();
    state.channels.clear_search();
}

fn submit_command(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if state.input_mode != InputMode::Command {
        return Ok((false, vec![]));
    }

    let command = match commands::parse(&state.command_input) {
        Ok(command) => command,
        Err(e) => {
            // Keep the typed text so it can be corrected.
            state.report_error(e.to_string());
            return Ok((true, vec![]));
        }
    };

    tracing::debug!(command = ?command, "command submitted");
    state.command_input.clear();
    state.input_mode = InputMode::Normal;

    let actions = run_command(state, command);
    Ok((true, actions))
}

/// Executes a parsed command: navigation runs locally, the rest becomes requests.
fn run_command(state: &mut AppState, command: SlashCommand) -> Vec<Action> {
    match command {
        SlashCommand::Search { term } => {
            let matches = state.channels.search(&term);
            if matches == 0 {
                state.notify(format!("No channels match '{term}'"));
            } else {
                state.search_query = term;
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            vec![]
        }
        SlashCommand::SearchNext => {
            step_search(state, ChannelList::search_next);
            vec![]
        }
        SlashCommand::SearchPrev => {
            step_search(state, ChannelList::search_prev);
            vec![]
        }
        SlashCommand::ToggleUnread => {
            state.channels.toggle_unread_only();
            vec![]
        }
        SlashCommand::JumpToUnread => {
            if !state.channels.jump_to_first_unread() {
                state.notify("No unread conversations");
            }
            vec![]
        }
        SlashCommand::Message { text } => {
            request_for_selected(state, |channel_id| ServiceRequest::send_message(channel_id, text))
        }
        SlashCommand::Delete { message_id } => request_for_selected(state, |channel_id| {
            ServiceRequest::delete_message(channel_id, message_id)
        }),
        SlashCommand::Edit {
            message_id,
            text: Some(text),
        } => request_for_selected(state, |channel_id| {
            ServiceRequest::edit_message(channel_id, message_id, text)
        }),
        SlashCommand::Edit {
            message_id,
            text: None,
        } => request_for_selected(state, |channel_id| {
            ServiceRequest::fetch_message(channel_id, message_id)
        }),
        SlashCommand::Thread { message_id, text } => request_for_selected(state, |channel_id| {
            ServiceRequest::send_reply(channel_id, message_id, text)
        }),
        SlashCommand::Passthrough { command, text } => request_for_selected(state, |channel_id| {
            ServiceRequest::run_command(channel_id, command, text)
        }),
    }
}

/// Builds a request addressed to the selected channel.
fn request_for_selected(
    state: &mut AppState,
    build: impl FnOnce(String) -> ServiceRequest,
) -> Vec<Action> {
    let Some(channel_id) = state.channels.selected_id().map(str::to_string) else {
        state.report_error("No channel selected");
        return vec![];
    };

    vec![Action::Request(build(channel_id))]
}

fn handle_service_event(state: &mut AppState, event: &ServiceEvent) -> (bool, Vec<Action>) {
    match event {
        ServiceEvent::ChannelsLoaded { channels } => {
            let previous = state.channels.selected_id().map(str::to_string);
            state.channels.set_channels(channels.clone());

            // A refresh should not yank the cursor back to the top.
            if let Some(id) = previous {
                state.channels.set_selected(&id);
            }

            tracing::debug!(
                channels = state.channels.len(),
                unread = state.channels.unread_count(),
                "channels loaded"
            );
            (true, vec![])
        }
        ServiceEvent::PresenceChanged { channel_id, presence } => {
            (state.channels.set_presence(channel_id, *presence), vec![])
        }
        ServiceEvent::MessageReceived { channel_id } => {
            if state.channels.selected_id() == Some(channel_id.as_str()) {
                tracing::debug!(channel_id = %channel_id, "message in open channel");
                return (false, vec![]);
            }
            (state.channels.mark_unread(channel_id), vec![])
        }
        ServiceEvent::ChannelRead { channel_id } => (state.channels.mark_read(channel_id), vec![]),
        ServiceEvent::EditDraft { message_id, text } => {
            state.input_mode = InputMode::Command;
            state.command_input = format!("/edit {message_id} {text}");
            (true, vec![])
        }
        ServiceEvent::Error { message } => {
            state.report_error(message.clone());
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChannelKind, ChannelRecord, Presence};
    use crate::ui::Theme;

    fn loaded_state(names: &[&str]) -> AppState {
        let mut state = AppState::new(ChannelList::new(5, false), Theme::default());
        let channels = names
            .iter()
            .map(|name| ChannelRecord::new(format!("id-{name}"), *name, ChannelKind::Channel))
            .collect();
        handle_event(&mut state, &Event::Service(ServiceEvent::ChannelsLoaded { channels })).unwrap();
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn selecting_marks_read_and_requests_it() {
        let mut state = loaded_state(&["general", "random"]);
        handle_event(
            &mut state,
            &Event::Service(ServiceEvent::MessageReceived {
                channel_id: "id-random".to_string(),
            }),
        )
        .unwrap();
        handle_event(&mut state, &Event::KeyDown).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::SelectChannel).unwrap();
        assert!(render);
        assert_eq!(
            actions,
            vec![Action::Request(ServiceRequest::mark_read("id-random".to_string()))]
        );
        assert_eq!(state.channels.unread_count(), 0);
    }

    #[test]
    fn message_in_selected_channel_stays_read() {
        let mut state = loaded_state(&["general", "random"]);
        let (render, _) = handle_event(
            &mut state,
            &Event::Service(ServiceEvent::MessageReceived {
                channel_id: "id-general".to_string(),
            }),
        )
        .unwrap();

        assert!(!render);
        assert_eq!(state.channels.unread_count(), 0);
    }

    #[test]
    fn refresh_keeps_the_selection() {
        let mut state = loaded_state(&["general", "random", "dev"]);
        handle_event(&mut state, &Event::KeyBottom).unwrap();

        let channels = ["general", "random", "dev"]
            .iter()
            .map(|name| ChannelRecord::new(format!("id-{name}"), *name, ChannelKind::Channel))
            .collect();
        handle_event(&mut state, &Event::Service(ServiceEvent::ChannelsLoaded { channels })).unwrap();

        assert_eq!(state.channels.selected_id(), Some("id-dev"));
    }

    #[test]
    fn typing_searches_incrementally() {
        let mut state = loaded_state(&["general", "random", "genesis"]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "gen");

        assert_eq!(state.search_query, "gen");
        assert_eq!(state.channels.list_search_results().len(), 2);

        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));

        // Keys no longer edit the query while navigating.
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);

        handle_event(&mut state, &Event::SearchNext).unwrap();
        assert_eq!(state.channels.selected_id(), Some("id-genesis"));

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.channels.list_search_results().is_empty());
        assert_eq!(state.channels.selected_id(), Some("id-genesis"));
    }

    #[test]
    fn opened_result_keeps_search_navigable() {
        let mut state = loaded_state(&["general", "random", "genesis"]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "gen");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        handle_event(&mut state, &Event::SelectChannel).unwrap();

        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.search_query.is_empty());
        assert_eq!(state.channels.list_search_results().len(), 2);

        let (render, _) = handle_event(&mut state, &Event::SearchNext).unwrap();
        assert!(render);
        assert_eq!(state.channels.selected_id(), Some("id-genesis"));

        handle_event(&mut state, &Event::CommandMode).unwrap();
        type_text(&mut state, "/prev");
        handle_event(&mut state, &Event::SubmitCommand).unwrap();
        assert_eq!(state.channels.selected_id(), Some("id-general"));
        assert!(state.status.is_none());

        // Escape from normal mode drops the results.
        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(state.channels.list_search_results().is_empty());
    }

    #[test]
    fn cycling_without_results_sets_status() {
        let mut state = loaded_state(&["general", "random"]);

        let (render, _) = handle_event(&mut state, &Event::SearchNext).unwrap();
        assert!(render);
        assert_eq!(
            state.status.as_ref().map(|s| s.text.as_str()),
            Some("No search results")
        );
        assert_eq!(state.channels.selected_id(), Some("id-general"));
    }

    #[test]
    fn backspace_to_empty_clears_results() {
        let mut state = loaded_state(&["general", "random"]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "g");
        handle_event(&mut state, &Event::Backspace).unwrap();

        assert!(state.channels.list_search_results().is_empty());
        assert_eq!(state.channels.search_term(), "");
    }

    #[test]
    fn submitting_a_search_without_matches_stays_in_the_query() {
        let mut state = loaded_state(&["general"]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "zzz");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();

        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Typing));
        assert!(state.status.is_some());
    }

    #[test]
    fn plain_text_is_sent_to_the_selected_channel() {
        let mut state = loaded_state(&["general"]);
        handle_event(&mut state, &Event::CommandMode).unwrap();
        type_text(&mut state, "hello");

        let (_, actions) = handle_event(&mut state, &Event::SubmitCommand).unwrap();
        assert_eq!(
            actions,
            vec![Action::Request(ServiceRequest::send_message(
                "id-general".to_string(),
                "hello".to_string()
            ))]
        );
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.command_input.is_empty());
    }

    #[test]
    fn malformed_command_reports_and_keeps_input() {
        let mut state = loaded_state(&["general"]);
        handle_event(&mut state, &Event::CommandMode).unwrap();
        type_text(&mut state, "/thread abc");

        let (render, actions) = handle_event(&mut state, &Event::SubmitCommand).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Command);
        assert_eq!(state.command_input, "/thread abc");
        let status = state.status.as_ref().unwrap();
        assert_eq!(status.text, "/thread command malformed");
    }

    #[test]
    fn edit_without_text_fetches_then_drafts() {
        let mut state = loaded_state(&["general"]);
        handle_event(&mut state, &Event::CommandMode).unwrap();
        type_text(&mut state, "/edit bStUiQ");

        let (_, actions) = handle_event(&mut state, &Event::SubmitCommand).unwrap();
        assert_eq!(
            actions,
            vec![Action::Request(ServiceRequest::fetch_message(
                "id-general".to_string(),
                "bStUiQ".to_string()
            ))]
        );

        handle_event(
            &mut state,
            &Event::Service(ServiceEvent::EditDraft {
                message_id: "bStUiQ".to_string(),
                text: "old body".to_string(),
            }),
        )
        .unwrap();
        assert_eq!(state.input_mode, InputMode::Command);
        assert_eq!(state.command_input, "/edit bStUiQ old body");
    }

    #[test]
    fn navigation_commands_run_locally() {
        let mut state = loaded_state(&["general", "random", "genesis"]);
        handle_event(&mut state, &Event::CommandMode).unwrap();
        type_text(&mut state, "/search gen");

        let (_, actions) = handle_event(&mut state, &Event::SubmitCommand).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
        assert_eq!(state.channels.list_search_results().len(), 2);
    }

    #[test]
    fn jump_to_unread_without_unread_sets_status() {
        let mut state = loaded_state(&["general"]);
        handle_event(&mut state, &Event::JumpToUnread).unwrap();
        assert_eq!(
            state.status.as_ref().map(|s| s.text.as_str()),
            Some("No unread conversations")
        );
    }

    #[test]
    fn presence_and_errors_from_service() {
        let mut state = AppState::new(ChannelList::new(5, false), Theme::default());
        let mut dm = ChannelRecord::new("D1", "alice", ChannelKind::DirectMessage);
        dm.presence = Presence::Active;
        handle_event(
            &mut state,
            &Event::Service(ServiceEvent::ChannelsLoaded { channels: vec![dm] }),
        )
        .unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::Service(ServiceEvent::PresenceChanged {
                channel_id: "D1".to_string(),
                presence: Presence::Away,
            }),
        )
        .unwrap();
        assert!(render);
        assert_eq!(state.channels.records()[0].presence, Presence::Away);

        handle_event(
            &mut state,
            &Event::Service(ServiceEvent::Error {
                message: "not_in_channel".to_string(),
            }),
        )
        .unwrap();
        assert!(state.status.is_some());
    }

    #[test]
    fn pushed_payload_marks_channels_unread() {
        let mut state = loaded_state(&["general", "random", "dev"]);
        let payload = concat!(
            r#"{"MessageReceived":{"channel_id":"id-random"}}"#,
            "\n",
            "garbage\n",
            r#"{"MessageReceived":{"channel_id":"id-dev"}}"#,
            "\n",
        );

        let events = service_events(payload);
        assert_eq!(events.len(), 2);
        for event in &events {
            handle_event(&mut state, event).unwrap();
        }

        assert_eq!(state.channels.unread_count(), 2);
    }

    #[test]
    fn refresh_and_close_only_emit_actions() {
        let mut state = loaded_state(&["general"]);
        let (render, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert!(!render);
        assert!(matches!(
            actions.as_slice(),
            [Action::Request(ServiceRequest::ListChannels { .. })]
        ));

        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
