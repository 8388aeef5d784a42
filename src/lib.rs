//! Chatterm: a Zellij plugin pane for navigating chat conversations.
//!
//! Chatterm shows the conversations of an external chat service as a
//! scrollable, filterable list:
//! - Vim-style navigation with a cursor that scrolls only at the viewport edges
//! - Unread-only filtering that never hides the selected channel
//! - Fuzzy channel search with result cycling and match highlighting
//! - A command bar for messages and `/edit`, `/delete`, `/thread` commands
//! - Presence-aware icons for direct messages

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, pipes,
//! └─────────────────────────────────────────────────────┘    command output
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Channel list: store, filter, cursor, search      │
//! │  - Event handling and slash commands                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                   ┌─────────────────┐
//! │ UI Layer      │                   │ Service Layer   │
//! │ (ui/)         │                   │ (service/)      │
//! │ - Components  │                   │ - Requests      │
//! │ - Theming     │                   │ - Events        │
//! └───────────────┘                   └─────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Channel records and formatting                   │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Talking to the chat service
//!
//! The plugin never speaks the chat service's protocol itself. Requests run
//! the configured `service_command` with one JSON
//! [`ServiceRequest`](service::ServiceRequest) as its last argument, and each
//! line the command prints is decoded as a [`ServiceEvent`](service::ServiceEvent).
//! Pushed notifications arrive through Zellij pipes:
//!
//! ```sh
//! zellij pipe --name chatterm -- '{"MessageReceived":{"channel_id":"C024BE91L"}}'
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/chatterm.wasm" {
//!         service_command "chatterm-service --profile work"
//!         unread_only "false"
//!         refresh_interval "60"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use chatterm::domain::{ChannelKind, ChannelRecord};
//! use chatterm::service::ServiceEvent;
//! use chatterm::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let channels = vec![
//!     ChannelRecord::new("C1", "general", ChannelKind::Channel),
//!     ChannelRecord::new("C2", "random", ChannelKind::Channel).unread(),
//! ];
//!
//! handle_event(&mut state, &Event::Service(ServiceEvent::ChannelsLoaded { channels }))?;
//! handle_event(&mut state, &Event::JumpToUnread)?;
//! let (_render, actions) = handle_event(&mut state, &Event::SelectChannel)?;
//!
//! assert_eq!(state.channels.unread_count(), 0);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), chatterm::ChatError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod service;

pub mod ui;

pub mod observability;

pub use app::{
    handle_event, service_events, Action, AppState, ChannelList, Event, InputMode, SearchFocus,
};
pub use domain::{ChannelRecord, ChatError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Command used to reach the chat service when none is configured.
pub const DEFAULT_SERVICE_COMMAND: &str = "chatterm-service";

/// Seconds between channel list refreshes when none is configured.
pub const DEFAULT_REFRESH_INTERVAL: u64 = 60;

/// Plugin configuration parsed from Zellij's KDL plugin block.
///
/// Every key is optional. Values that fail to parse fall back to their
/// defaults with a debug log rather than failing the plugin load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program (plus leading arguments) that carries requests to the service.
    pub service_command: String,

    /// Start with unread-only filtering on.
    pub unread_only: bool,

    /// Seconds between channel list refreshes; `0` disables polling.
    pub refresh_interval: u64,

    /// Built-in theme name.
    pub theme_name: Option<String>,

    /// Path to a custom theme TOML file; wins over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `debug` or `chatterm=trace`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_command: DEFAULT_SERVICE_COMMAND.to_string(),
            unread_only: false,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from the key/value pairs Zellij hands to `load`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatterm::Config;
    /// use std::collections::BTreeMap;
    ///
    /// let mut raw = BTreeMap::new();
    /// raw.insert("unread_only".to_string(), "true".to_string());
    /// raw.insert("refresh_interval".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&raw);
    /// assert!(config.unread_only);
    /// assert_eq!(config.refresh_interval, 0);
    /// assert_eq!(config.service_command, "chatterm-service");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let service_command = config
            .get("service_command")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.service_command, str::to_string);

        let unread_only = config.get("unread_only").map_or(defaults.unread_only, |raw| {
            parse_bool(raw).unwrap_or_else(|| {
                tracing::debug!(value = %raw, "invalid unread_only, using default");
                defaults.unread_only
            })
        });

        let refresh_interval =
            config
                .get("refresh_interval")
                .map_or(defaults.refresh_interval, |raw| {
                    raw.trim().parse::<u64>().unwrap_or_else(|e| {
                        tracing::debug!(value = %raw, error = %e, "invalid refresh_interval, using default");
                        defaults.refresh_interval
                    })
                });

        Self {
            service_command,
            unread_only,
            refresh_interval,
            theme_name: config.get("theme").cloned(),
            theme_file: config
                .get("theme_file")
                .map(|path| infrastructure::expand_tilde(path)),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// The service command split into program and leading arguments.
    #[must_use]
    pub fn service_argv(&self) -> Vec<&str> {
        self.service_command.split_whitespace().collect()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Creates the initial application state for a configuration.
///
/// The channel list starts empty with a zero-row viewport; the first render
/// sizes it and the first service response fills it.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        service_command = %config.service_command,
        unread_only = config.unread_only,
        "initializing chatterm plugin"
    );

    let theme = Theme::resolve(config.theme_name.as_deref(), config.theme_file.as_deref());
    AppState::new(ChannelList::new(0, config.unread_only), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&raw(&[
            ("service_command", " slack-bridge --profile work "),
            ("unread_only", "Yes"),
            ("refresh_interval", "15"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/.config/chatterm/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.service_command, "slack-bridge --profile work");
        assert_eq!(config.service_argv(), vec!["slack-bridge", "--profile", "work"]);
        assert!(config.unread_only);
        assert_eq!(config.refresh_interval, 15);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(
            config.theme_file.as_deref(),
            Some("/host/.config/chatterm/theme.toml")
        );
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_zellij(&raw(&[
            ("service_command", "   "),
            ("unread_only", "maybe"),
            ("refresh_interval", "-5"),
        ]));

        assert_eq!(config.service_command, DEFAULT_SERVICE_COMMAND);
        assert!(!config.unread_only);
        assert_eq!(config.refresh_interval, DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn initialize_applies_filter_and_theme() {
        let config = Config {
            unread_only: true,
            theme_name: Some("catppuccin-frappe".to_string()),
            ..Config::default()
        };

        let state = initialize(&config);
        assert!(state.channels.unread_only());
        assert!(state.channels.is_empty());
        assert_eq!(state.theme.name, "catppuccin-frappe");
    }
}
