//! Sandbox path translation.

use std::path::PathBuf;

/// Host home directory as seen from inside the plugin sandbox.
const SANDBOX_HOME: &str = "/host";

/// Directory holding the plugin's trace file.
///
/// Resolves to `~/.local/share/zellij/chatterm` on the host.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(SANDBOX_HOME)
        .join(".local/share/zellij")
        .join("chatterm")
}

/// Rewrites a leading `~` to the sandbox home mount; other paths pass through.
///
/// # Example
///
/// ```rust
/// use chatterm::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/.config/chatterm/theme.toml"), "/host/.config/chatterm/theme.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => SANDBOX_HOME.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{SANDBOX_HOME}{rest}"),
        _ => path.to_string(),
    }
}
