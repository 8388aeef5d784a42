//! Conversation channel model and display formatting.
//!
//! A [`ChannelRecord`] is one conversation the chat service knows about: a
//! public channel, a private group, a direct message or a multi-party direct
//! message. Records are identified by their `id`, which stays stable for the
//! lifetime of the record; everything else may be patched by service events.

use serde::{Deserialize, Serialize};

/// Notification marker shown in front of channels with unread activity.
const ICON_NOTIFICATION: &str = "*";

const ICON_CHANNEL: &str = "#";
const ICON_GROUP: &str = "☰";
const ICON_ONLINE: &str = "●";
const ICON_OFFLINE: &str = "○";

/// Kind of conversation, which drives icon selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Public channel.
    #[serde(rename = "channel")]
    Channel,
    /// Private group.
    #[serde(rename = "group")]
    Group,
    /// One-to-one direct message.
    #[serde(rename = "im")]
    DirectMessage,
    /// Direct message with several participants.
    #[serde(rename = "mpim")]
    MultiPartyDirectMessage,
}

/// Presence of the peer in a direct message.
///
/// Only meaningful for [`ChannelKind::DirectMessage`]. Parsing is lenient:
/// any value other than `active` or `away` becomes [`Presence::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Presence {
    Active,
    Away,
    #[default]
    Unknown,
}

impl From<&str> for Presence {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "away" => Self::Away,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for Presence {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// A single conversation in the channel list.
///
/// `has_unread` is driven by service notifications and cleared when the user
/// reads the channel. `is_search_match` is transient: it is recomputed by
/// every search and never travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub topic: String,
    pub kind: ChannelKind,
    /// Peer user for direct messages, used to route presence updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub presence: Presence,
    #[serde(default)]
    pub has_unread: bool,
    #[serde(skip)]
    pub is_search_match: bool,
}

impl ChannelRecord {
    /// Creates a read record with no topic and unknown presence.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterm::domain::{ChannelKind, ChannelRecord};
    ///
    /// let dm = ChannelRecord::new("D42", "alice", ChannelKind::DirectMessage);
    /// assert!(!dm.has_unread);
    /// assert!(dm.topic.is_empty());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            topic: String::new(),
            kind,
            user_id: None,
            presence: Presence::Unknown,
            has_unread: false,
            is_search_match: false,
        }
    }

    /// Builder-style helper to mark the record as having unread activity.
    #[must_use]
    pub const fn unread(mut self) -> Self {
        self.has_unread = true;
        self
    }

    /// Builder-style helper to set the topic.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Icon for the record's kind; direct messages reflect the peer's presence.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self.kind {
            ChannelKind::Channel => ICON_CHANNEL,
            ChannelKind::Group | ChannelKind::MultiPartyDirectMessage => ICON_GROUP,
            ChannelKind::DirectMessage => match self.presence {
                Presence::Away => ICON_OFFLINE,
                Presence::Active | Presence::Unknown => ICON_ONLINE,
            },
        }
    }

    /// `*` when the channel has unread activity, a single space otherwise.
    #[must_use]
    pub const fn notification_marker(&self) -> &'static str {
        if self.has_unread {
            ICON_NOTIFICATION
        } else {
            " "
        }
    }

    /// The line shown in the channel list: marker, icon and name.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterm::domain::{ChannelKind, ChannelRecord};
    ///
    /// let random = ChannelRecord::new("C02", "random", ChannelKind::Channel).unread();
    /// assert_eq!(random.label(), "* # random");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} {}", self.notification_marker(), self.icon(), self.name)
    }

    /// Title for the conversation pane: `name - topic`, or just the name.
    ///
    /// The service sends names and topics HTML-escaped; they are unescaped here.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterm::domain::{ChannelKind, ChannelRecord};
    ///
    /// let chan = ChannelRecord::new("C03", "r&amp;d", ChannelKind::Channel)
    ///     .with_topic("ship &lt;it&gt;");
    /// assert_eq!(chan.title(), "r&d - ship <it>");
    /// ```
    #[must_use]
    pub fn title(&self) -> String {
        if self.topic.is_empty() {
            unescape_entities(&self.name)
        } else {
            format!(
                "{} - {}",
                unescape_entities(&self.name),
                unescape_entities(&self.topic)
            )
        }
    }
}

/// Reverses the handful of entities the chat service escapes in text fields.
fn unescape_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    // `&amp;` last, so `&amp;lt;` becomes `&lt;` rather than `<`.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_message_icon_follows_presence() {
        let mut dm = ChannelRecord::new("D1", "bob", ChannelKind::DirectMessage);
        assert_eq!(dm.icon(), ICON_ONLINE);

        dm.presence = Presence::Away;
        assert_eq!(dm.icon(), ICON_OFFLINE);

        dm.presence = Presence::Active;
        assert_eq!(dm.icon(), ICON_ONLINE);
    }

    #[test]
    fn group_kinds_share_an_icon() {
        let group = ChannelRecord::new("G1", "ops", ChannelKind::Group);
        let mpim = ChannelRecord::new("M1", "a-b-c", ChannelKind::MultiPartyDirectMessage);
        assert_eq!(group.icon(), ICON_GROUP);
        assert_eq!(mpim.icon(), ICON_GROUP);
    }

    #[test]
    fn title_without_topic_is_the_name() {
        let chan = ChannelRecord::new("C1", "general", ChannelKind::Channel);
        assert_eq!(chan.title(), "general");
    }

    #[test]
    fn presence_parses_leniently() {
        assert_eq!(Presence::from("active"), Presence::Active);
        assert_eq!(Presence::from(" AWAY "), Presence::Away);
        assert_eq!(Presence::from("dnd"), Presence::Unknown);
    }

    #[test]
    fn deserializes_service_payload() {
        let json = r#"{"id":"D7","name":"carol","kind":"im","presence":"away","has_unread":true}"#;
        let record: ChannelRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.kind, ChannelKind::DirectMessage);
        assert_eq!(record.presence, Presence::Away);
        assert!(record.has_unread);
        assert!(!record.is_search_match);
        assert!(record.topic.is_empty());
    }

    #[test]
    fn unknown_presence_string_is_not_an_error() {
        let json = r#"{"id":"D8","name":"dan","kind":"im","presence":"offline"}"#;
        let record: ChannelRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.presence, Presence::Unknown);
    }
}
