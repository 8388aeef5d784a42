//! Slash command parsing for the command bar.
//!
//! Text typed in command mode is either a plain message for the selected
//! channel or a `/command`. Message-related commands are forwarded to the chat
//! service with their message ids untouched; navigation commands drive the
//! channel list locally.
//!
//! # Example
//!
//! ```
//! use chatterm::app::commands::{parse, SlashCommand};
//!
//! let cmd = parse("/thread bStUiQ Hello!")?;
//! assert_eq!(
//!     cmd,
//!     SlashCommand::Thread {
//!         message_id: "bStUiQ".to_string(),
//!         text: "Hello!".to_string(),
//!     }
//! );
//! # Ok::<(), chatterm::ChatError>(())
//! ```

use crate::domain::{ChatError, Result};

/// A parsed line from the command bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Plain text to post in the selected channel.
    Message { text: String },
    /// `/delete <id>`
    Delete { message_id: String },
    /// `/edit <id> [text]`; without text the current body is fetched for editing.
    Edit {
        message_id: String,
        text: Option<String>,
    },
    /// `/thread <id> <text>`: reply in the thread of a message.
    Thread { message_id: String, text: String },
    /// `/search <term>`
    Search { term: String },
    /// `/next`
    SearchNext,
    /// `/prev`
    SearchPrev,
    /// `/unread`: toggle unread-only filtering.
    ToggleUnread,
    /// `/jump`: jump to the first channel with unread activity.
    JumpToUnread,
    /// Any other `/command text`, passed through to the service.
    Passthrough { command: String, text: String },
}

/// Parses a line from the command bar.
///
/// # Errors
///
/// Returns [`ChatError::Command`] with a user-facing message when a command is
/// missing its required arguments, or when the input is empty.
pub fn parse(input: &str) -> Result<SlashCommand> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ChatError::Command("Nothing to send".to_string()));
    }

    let Some(body) = input.strip_prefix('/') else {
        return Ok(SlashCommand::Message {
            text: input.to_string(),
        });
    };

    let (command, params) = split_word(body);

    match command {
        "delete" => {
            let message_id = params
                .split_whitespace()
                .last()
                .filter(|id| is_message_id(id))
                .ok_or_else(|| {
                    ChatError::Command(
                        "Please provide a message ID. E.g. /delete aFksE8".to_string(),
                    )
                })?;

            Ok(SlashCommand::Delete {
                message_id: message_id.to_string(),
            })
        }
        "edit" => {
            let (message_id, text) = split_word(params);
            if !is_message_id(message_id) {
                return Err(ChatError::Command("/edit command malformed".to_string()));
            }

            Ok(SlashCommand::Edit {
                message_id: message_id.to_string(),
                text: (!text.is_empty()).then(|| text.to_string()),
            })
        }
        "thread" => {
            let (message_id, text) = split_word(params);
            if !is_message_id(message_id) || text.is_empty() {
                return Err(ChatError::Command("/thread command malformed".to_string()));
            }

            Ok(SlashCommand::Thread {
                message_id: message_id.to_string(),
                text: text.to_string(),
            })
        }
        "search" => {
            if params.is_empty() {
                return Err(ChatError::Command("Usage: /search <term>".to_string()));
            }
            Ok(SlashCommand::Search {
                term: params.to_string(),
            })
        }
        "next" => Ok(SlashCommand::SearchNext),
        "prev" => Ok(SlashCommand::SearchPrev),
        "unread" => Ok(SlashCommand::ToggleUnread),
        "jump" => Ok(SlashCommand::JumpToUnread),
        _ => {
            if !is_message_id(command) || params.is_empty() {
                return Err(ChatError::Command("slash command malformed".to_string()));
            }

            Ok(SlashCommand::Passthrough {
                command: format!("/{command}"),
                text: params.to_string(),
            })
        }
    }
}

/// Splits off the first whitespace-delimited word; the rest is trimmed.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    text.split_once(char::is_whitespace)
        .map_or((text, ""), |(word, rest)| (word, rest.trim()))
}

/// Message ids and command names are runs of word characters.
fn is_message_id(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_message(input: &str) -> String {
        parse(input).unwrap_err().to_string()
    }

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            parse("  hello there ").unwrap(),
            SlashCommand::Message {
                text: "hello there".to_string()
            }
        );
    }

    #[test]
    fn delete_takes_trailing_id() {
        assert_eq!(
            parse("/delete aFksE8").unwrap(),
            SlashCommand::Delete {
                message_id: "aFksE8".to_string()
            }
        );
        assert_eq!(
            error_message("/delete"),
            "Please provide a message ID. E.g. /delete aFksE8"
        );
    }

    #[test]
    fn edit_with_and_without_text() {
        assert_eq!(
            parse("/edit bStUiQ Oops, I made a typo.").unwrap(),
            SlashCommand::Edit {
                message_id: "bStUiQ".to_string(),
                text: Some("Oops, I made a typo.".to_string()),
            }
        );
        assert_eq!(
            parse("/edit bStUiQ").unwrap(),
            SlashCommand::Edit {
                message_id: "bStUiQ".to_string(),
                text: None,
            }
        );
        assert_eq!(error_message("/edit"), "/edit command malformed");
    }

    #[test]
    fn thread_requires_text() {
        assert_eq!(error_message("/thread bStUiQ"), "/thread command malformed");
        assert_eq!(error_message("/thread"), "/thread command malformed");
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(
            parse("/search gen").unwrap(),
            SlashCommand::Search {
                term: "gen".to_string()
            }
        );
        assert_eq!(parse("/next").unwrap(), SlashCommand::SearchNext);
        assert_eq!(parse("/prev").unwrap(), SlashCommand::SearchPrev);
        assert_eq!(parse("/unread").unwrap(), SlashCommand::ToggleUnread);
        assert_eq!(parse("/jump").unwrap(), SlashCommand::JumpToUnread);
        assert!(parse("/search").is_err());
    }

    #[test]
    fn unknown_commands_pass_through() {
        assert_eq!(
            parse("/giphy party parrot").unwrap(),
            SlashCommand::Passthrough {
                command: "/giphy".to_string(),
                text: "party parrot".to_string(),
            }
        );
        assert_eq!(error_message("/giphy"), "slash command malformed");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(parse("   ").is_err());
    }
}
