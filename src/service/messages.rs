//! Request and event types exchanged with the chat-service bridge.
//!
//! Requests carry an optional [`TraceContext`] so spans recorded by the
//! bridge can be linked to the plugin span that issued them.

use crate::domain::{ChannelRecord, Presence, Result};
use serde::{Deserialize, Serialize};

/// Trace and parent span ids of the span that issued a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span, used as the parent on the bridge side.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry ids of the current tracing span.
    ///
    /// Returns `None` when tracing is disabled or the span is not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `ServiceRequest` constructors that attach the current trace context.
macro_rules! service_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl ServiceRequest {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` request tagged with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

service_request_builders! {
    list_channels(ListChannels {}),
    mark_read(MarkRead { channel_id: String }),
    send_message(SendMessage { channel_id: String, text: String }),
    edit_message(EditMessage { channel_id: String, message_id: String, text: String }),
    fetch_message(FetchMessage { channel_id: String, message_id: String }),
    delete_message(DeleteMessage { channel_id: String, message_id: String }),
    send_reply(SendReply { channel_id: String, message_id: String, text: String }),
    run_command(RunCommand { channel_id: String, command: String, text: String }),
}

/// Requests sent from the plugin to the bridge.
///
/// Message ids are opaque to the plugin and forwarded exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceRequest {
    /// Fetch every channel with unread and presence metadata.
    ListChannels {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Tell the service the user has read a channel.
    MarkRead {
        channel_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Post a message in a channel.
    SendMessage {
        channel_id: String,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Replace the body of an existing message.
    EditMessage {
        channel_id: String,
        message_id: String,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Ask for the current body of a message; answered with [`ServiceEvent::EditDraft`].
    FetchMessage {
        channel_id: String,
        message_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Delete a message.
    DeleteMessage {
        channel_id: String,
        message_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Reply in the thread of a message, starting the thread if needed.
    SendReply {
        channel_id: String,
        message_id: String,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Run a slash command the plugin does not handle itself.
    RunCommand {
        channel_id: String,
        command: String,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl ServiceRequest {
    /// Short name used in logs and as the `run_command` context tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ListChannels { .. } => "list_channels",
            Self::MarkRead { .. } => "mark_read",
            Self::SendMessage { .. } => "send_message",
            Self::EditMessage { .. } => "edit_message",
            Self::FetchMessage { .. } => "fetch_message",
            Self::DeleteMessage { .. } => "delete_message",
            Self::SendReply { .. } => "send_reply",
            Self::RunCommand { .. } => "run_command",
        }
    }

    /// Serializes the request for the bridge command line.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChatError::Protocol`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Events sent from the bridge to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceEvent {
    /// Full channel list; replaces the store.
    ChannelsLoaded { channels: Vec<ChannelRecord> },

    /// Presence of a direct-message peer changed.
    PresenceChanged {
        channel_id: String,
        presence: Presence,
    },

    /// A message arrived in a channel.
    MessageReceived { channel_id: String },

    /// A channel was read elsewhere (another client, for instance).
    ChannelRead { channel_id: String },

    /// Body of a message the user asked to edit.
    EditDraft { message_id: String, text: String },

    /// The bridge failed to carry out a request.
    Error { message: String },
}

impl ServiceEvent {
    /// Decodes a single JSON event.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChatError::Protocol`] when the payload is not a valid event.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload.trim())?)
    }
}

/// Decodes bridge output with one JSON event per line.
///
/// Blank lines are skipped. Lines that fail to decode are logged and dropped
/// so one bad line does not lose the rest of the batch.
#[must_use]
pub fn decode_events(output: &str) -> Vec<ServiceEvent> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match ServiceEvent::from_json(line) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(error = %e, line_len = line.len(), "dropping undecodable service event");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChannelKind;

    #[test]
    fn builders_omit_missing_trace_context() {
        let request = ServiceRequest::mark_read("C1".to_string());
        let json = request.to_json().unwrap();
        assert_eq!(json, r#"{"MarkRead":{"channel_id":"C1"}}"#);
        assert_eq!(request.kind(), "mark_read");
    }

    #[test]
    fn list_channels_serializes_as_tagged_object() {
        let json = ServiceRequest::list_channels().to_json().unwrap();
        assert_eq!(json, r#"{"ListChannels":{}}"#);
    }

    #[test]
    fn decodes_channel_list() {
        let payload = r#"{"ChannelsLoaded":{"channels":[
            {"id":"C1","name":"general","kind":"channel"},
            {"id":"D1","name":"alice","kind":"im","presence":"active","has_unread":true}
        ]}}"#;

        let ServiceEvent::ChannelsLoaded { channels } = ServiceEvent::from_json(payload).unwrap() else {
            panic!("expected ChannelsLoaded");
        };
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[1].kind, ChannelKind::DirectMessage);
        assert!(channels[1].has_unread);
    }

    #[test]
    fn decode_events_skips_bad_lines() {
        let output = concat!(
            r#"{"MessageReceived":{"channel_id":"C1"}}"#,
            "\n\nnot json\n",
            r#"{"PresenceChanged":{"channel_id":"D1","presence":"away"}}"#,
            "\n"
        );

        let events = decode_events(output);
        assert_eq!(
            events,
            vec![
                ServiceEvent::MessageReceived {
                    channel_id: "C1".to_string()
                },
                ServiceEvent::PresenceChanged {
                    channel_id: "D1".to_string(),
                    presence: Presence::Away,
                },
            ]
        );
    }
}
