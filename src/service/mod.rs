//! Protocol spoken with the external chat-service bridge.
//!
//! The plugin never talks to the chat network itself. A bridge process owns
//! the connection and authentication; the plugin exchanges JSON messages with
//! it:
//!
//! ```text
//!                 ServiceRequest (argument of service_command)
//!   plugin ────────────────────────────────────────────────▶ bridge
//!          ◀──────────────────────────────────────────────── 
//!                 ServiceEvent (stdout lines, or `zellij pipe`)
//! ```
//!
//! - `messages`: request/event types with trace context propagation

pub mod messages;

pub use messages::{decode_events, ServiceEvent, ServiceRequest, TraceContext};
