//! Domain layer for the chat client.
//!
//! Holds the types the rest of the plugin is built around, with no knowledge of
//! Zellij, rendering, or how the chat service is reached.
//!
//! # Organization
//!
//! - [`channel`]: Conversation records and their display formatting
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use chatterm::domain::{ChannelKind, ChannelRecord};
//!
//! let general = ChannelRecord::new("C01", "general", ChannelKind::Channel);
//! assert_eq!(general.label(), "  # general");
//! ```

pub mod channel;
pub mod error;

pub use channel::{ChannelKind, ChannelRecord, Presence};
pub use error::{ChatError, Result};
