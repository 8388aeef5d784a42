//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain and service
//! layers. Data flows one way:
//!
//! ```text
//! keys / pipe messages / command output
//!        │
//!        ▼
//!      Event ──▶ handle_event ──▶ AppState mutations ──▶ Actions
//!                                      │                    │
//!                                      ▼                    ▼
//!                                 render pane        service requests
//! ```
//!
//! # Modules
//!
//! - [`channels`]: the channel list with filter, cursor and search state
//! - [`commands`]: slash command parsing for the command bar
//! - [`handler`]: event processing and state transitions
//! - [`actions`]: side effects returned by the handler
//! - [`modes`]: input mode state machine types
//! - [`state`]: application state and view model computation

pub mod actions;
pub mod channels;
pub mod commands;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use channels::ChannelList;
pub use handler::{handle_event, service_events, Event};
pub use modes::{InputMode, SearchFocus};
pub use state::{AppState, StatusLevel, StatusMessage};
