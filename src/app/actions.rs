//! Side effects produced by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O. It returns
//! actions, and the plugin runtime executes them in order.
//!
//! # Example
//!
//! ```rust
//! use chatterm::app::Action;
//! use chatterm::service::ServiceRequest;
//!
//! let actions = vec![
//!     Action::Request(ServiceRequest::mark_read("C01".to_string())),
//! ];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::service::ServiceRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a request to the chat-service bridge.
    Request(ServiceRequest),
}
