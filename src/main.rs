//! Zellij plugin entry point.
//!
//! Bridges the Zellij runtime and the library: key presses, pipe messages,
//! command results and timers are mapped to [`chatterm::Event`]s, handled by
//! [`chatterm::handle_event`], and the returned actions are executed here. This
//! is the only file that calls into `zellij_tile`.
//!
//! # Key bindings
//!
//! | Mode              | Keys                                                        |
//! |-------------------|-------------------------------------------------------------|
//! | Normal            | `j`/`k`, `g`/`G`, Enter, `u`, Tab, `/`, `:`, `n`/`N`, `q`   |
//! | Search (typing)   | text, Backspace, Enter, Up/Down or Ctrl+n/p, Esc            |
//! | Search (results)  | `n`/`N` or `j`/`k`, `/`, Enter, Esc                         |
//! | Command           | text, Backspace, Enter, Esc                                 |

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use chatterm::service::{ServiceEvent, ServiceRequest};
use chatterm::{handle_event, service_events, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Pipe name and command-context tag identifying chatterm traffic.
const PIPE_NAME: &str = "chatterm";

/// Command-context key carrying [`PIPE_NAME`].
const CONTEXT_SOURCE: &str = "source";

/// Command-context key carrying the request kind, for logs and errors.
const CONTEXT_REQUEST: &str = "request";

struct State {
    app: chatterm::AppState,
    config: Config,
    permissions_granted: bool,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: chatterm::initialize(&config),
            config,
            permissions_granted: false,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        chatterm::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = chatterm::initialize(&config);
        self.config = config;

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::RunCommands,
            PermissionType::ReadCliPipes,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
            EventType::Timer,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        )
        .entered();

        let events = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => vec![event],
                None => return false,
            },
            zellij_tile::prelude::Event::RunCommandResult(exit_code, stdout, stderr, context) => {
                Self::map_command_result(exit_code, &stdout, &stderr, &context)
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => {
                self.schedule_refresh();
                vec![Event::Refresh]
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                self.handle_permission_result(status);
                return false;
            }
            _ => return false,
        };

        self.dispatch(&events)
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        if pipe_message.name != PIPE_NAME {
            return false;
        }

        let _guard = tracing::debug_span!("plugin_pipe", source = ?pipe_message.source).entered();

        if let PipeSource::Cli(ref pipe_id) = pipe_message.source {
            unblock_cli_pipe_input(pipe_id);
        }

        let Some(payload) = pipe_message.payload.as_deref() else {
            tracing::debug!("pipe message without payload");
            return false;
        };

        self.dispatch(&service_events(payload))
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if let Err(e) = handle_event(&mut self.app, &Event::Resize { rows }) {
            tracing::debug!(error = %e, "failed to fit viewport");
        }
        chatterm::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Handles events in order, executing their actions. Returns whether any
    /// of them asked for a render.
    fn dispatch(&mut self, events: &[Event]) -> bool {
        let mut should_render = false;

        for event in events {
            match handle_event(&mut self.app, event) {
                Ok((render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = render,
                        "event handled successfully"
                    );
                    should_render |= render;
                    for action in &actions {
                        self.execute_action(action);
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "error handling event");
                }
            }
        }

        should_render
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key, ctrl),
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Char('n') if ctrl => Event::SearchNext,
                BareKey::Char('p') if ctrl => Event::SearchPrev,
                BareKey::Down => Event::SearchNext,
                BareKey::Up => Event::SearchPrev,
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
                BareKey::Char('n' | 'j') | BareKey::Down => Event::SearchNext,
                BareKey::Char('N' | 'k') | BareKey::Up => Event::SearchPrev,
                BareKey::Char('/') => Event::FocusSearchBar,
                BareKey::Enter => Event::SelectChannel,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
            InputMode::Command => Some(match key.bare_key {
                BareKey::Enter => Event::SubmitCommand,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
        }
    }

    fn map_normal_key(key: &KeyWithModifier, ctrl: bool) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Char('n') if ctrl => Event::KeyDown,
            BareKey::Char('p') if ctrl => Event::KeyUp,
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Home | BareKey::Char('g') => Event::KeyTop,
            BareKey::End | BareKey::Char('G') => Event::KeyBottom,
            BareKey::Enter => Event::SelectChannel,
            BareKey::Char('u') => Event::ToggleUnreadOnly,
            BareKey::Tab => Event::JumpToUnread,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char(':' | 'i') => Event::CommandMode,
            BareKey::Char('n') => Event::SearchNext,
            BareKey::Char('N') => Event::SearchPrev,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        })
    }

    fn handle_permission_result(&mut self, status: PermissionStatus) {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading channels");
                self.permissions_granted = true;
                self.execute_action(&Action::Request(ServiceRequest::list_channels()));
                self.schedule_refresh();
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - plugin cannot reach the chat service");
                self.app
                    .report_error("Permissions denied: cannot run the chat service command");
            }
        }
    }

    fn schedule_refresh(&self) {
        if self.permissions_granted && self.config.refresh_interval > 0 {
            #[allow(clippy::cast_precision_loss)]
            set_timeout(self.config.refresh_interval as f64);
        }
    }

    /// Turns the output of a service command into events.
    ///
    /// Results from commands chatterm did not start are ignored. A failed
    /// command becomes a single service error built from its stderr.
    fn map_command_result(
        exit_code: Option<i32>,
        stdout: &[u8],
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Vec<Event> {
        if context.get(CONTEXT_SOURCE).map(String::as_str) != Some(PIPE_NAME) {
            tracing::debug!("ignoring result of a foreign command");
            return vec![];
        }

        let request = context
            .get(CONTEXT_REQUEST)
            .map_or("request", String::as_str);
        tracing::debug!(exit_code = ?exit_code, request = %request, "service command finished");

        if exit_code != Some(0) {
            let stderr = String::from_utf8_lossy(stderr);
            let message = match stderr.trim() {
                "" => format!("{request} failed (exit code {exit_code:?})"),
                detail => format!("{request} failed: {detail}"),
            };
            return vec![Event::Service(ServiceEvent::Error { message })];
        }

        service_events(&String::from_utf8_lossy(stdout))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Request(request) => {
                let payload = match request.to_json() {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::warn!(error = %e, request = request.kind(), "failed to encode request");
                        return;
                    }
                };

                let mut argv = self.config.service_argv();
                argv.push(&payload);

                let context = BTreeMap::from([
                    (CONTEXT_SOURCE.to_string(), PIPE_NAME.to_string()),
                    (CONTEXT_REQUEST.to_string(), request.kind().to_string()),
                ]);

                tracing::debug!(request = request.kind(), payload_len = payload.len(), "running service command");
                run_command(&argv, context);
            }
        }
    }
}
