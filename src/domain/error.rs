//! Error types for the chat client.
//!
//! The channel list itself never fails: its operations report success as plain
//! booleans. [`ChatError`] covers the edges of the plugin instead, where theme
//! files, service payloads and slash commands are read.

use thiserror::Error;

/// The main error type for chatterm operations.
///
/// # Examples
///
/// ```
/// use chatterm::domain::ChatError;
///
/// fn validate_command(input: &str) -> Result<(), ChatError> {
///     if input.starts_with('/') {
///         Ok(())
///     } else {
///         Err(ChatError::Command("not a slash command".to_string()))
///     }
/// }
///
/// assert!(validate_command("/delete abc").is_ok());
/// ```
#[derive(Debug, Error)]
pub enum ChatError {
    /// A slash command could not be parsed.
    ///
    /// The message is shown to the user verbatim in the status line.
    #[error("{0}")]
    Command(String),

    /// A payload exchanged with the chat service was not valid JSON for the
    /// expected message type.
    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    /// Theme lookup or parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for chatterm operations.
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_errors_display_without_prefix() {
        let err = ChatError::Command("/thread command malformed".to_string());
        assert_eq!(err.to_string(), "/thread command malformed");
    }

    #[test]
    fn protocol_errors_convert_from_serde() {
        let parse_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ChatError = parse_err.into();
        assert!(err.to_string().starts_with("Protocol error:"));
    }
}
