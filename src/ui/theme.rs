//! Theme management and ANSI escape sequence generation.
//!
//! Color schemes are TOML documents deserialized with `serde`. Four Catppuccin
//! flavours are compiled into the plugin; a custom file can replace them.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//! - `catppuccin-frappe`: muted dark
//! - `catppuccin-macchiato`: medium dark
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! unread_fg = "#f9e2af"
//! presence_active_fg = "#a6e3a1"
//! presence_away_fg = "#6c7086"
//! error_fg = "#f38ba8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use chatterm::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! print!("{}unread{}", Theme::fg(&theme.colors.unread_fg), Theme::reset());
//! ```

use crate::domain::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Cursor row foreground.
    pub selection_fg: String,
    /// Cursor row background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer and secondary text.
    pub text_dim: String,

    pub border: String,

    /// Border of the search and command input boxes.
    pub input_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Channels with unread activity.
    pub unread_fg: String,

    /// Direct-message icon when the peer is active.
    pub presence_active_fg: String,
    /// Direct-message icon when the peer is away.
    pub presence_away_fg: String,

    /// Error status messages.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Parameters
    ///
    /// * `name` - One of the bundled theme names, e.g. `catppuccin-latte`
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the name is recognized
    /// - `None` if the name is unknown
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatterm::ui::theme::Theme;
    ///
    /// assert!(Theme::from_name("catppuccin-macchiato").is_some());
    /// assert!(Theme::from_name("gruvbox").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Parameters
    ///
    /// * `path` - Path to the TOML file; `~` must already be expanded
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Theme`] if the file cannot be read or does not
    /// describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ChatError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| ChatError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Picks the theme for a configuration.
    ///
    /// A custom file wins over a built-in name; anything that fails to load
    /// falls back to the default with a debug log.
    ///
    /// # Parameters
    ///
    /// * `name` - Built-in theme name from the `theme` key
    /// * `file` - Custom theme path from the `theme_file` key
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatterm::ui::theme::Theme;
    ///
    /// let theme = Theme::resolve(Some("catppuccin-latte"), None);
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert_eq!(Theme::resolve(Some("unknown"), None), Theme::default());
    /// ```
    #[must_use]
    pub fn resolve(name: Option<&str>, file: Option<&str>) -> Self {
        if let Some(file) = file {
            match Self::from_file(file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::debug!(theme_file = %file, error = %e, "failed to load theme file, using fallback");
                }
            }
        }

        name.and_then(|name| {
            let theme = Self::from_name(name);
            if theme.is_none() {
                tracing::debug!(theme_name = %name, "unknown theme, using default");
            }
            theme
        })
        .unwrap_or_default()
    }

    /// Converts `#rrggbb` to an RGB tuple; malformed input yields white.
    ///
    /// # Parameters
    ///
    /// * `hex` - Hex color string, with or without the leading `#`
    ///
    /// # Returns
    ///
    /// An `(r, g, b)` tuple with values 0-255.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape sequence for a hex color.
    ///
    /// # Parameters
    ///
    /// * `hex` - Hex color string (e.g., "#f9e2af")
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatterm::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#000000"), "\u{1b}[38;2;0;0;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence for a hex color.
    ///
    /// # Parameters
    ///
    /// * `hex` - Hex color string (e.g., "#f5c2e7")
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the bundled theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_builtin_theme_parses() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn loads_custom_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        theme.colors.unread_fg = "#ff0000".to_string();
        write!(file, "{}", toml::to_string(&theme).unwrap()).unwrap();

        let loaded = Theme::from_file(file.path()).unwrap();
        assert_eq!(loaded, theme);
    }

    #[test]
    fn incomplete_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = \"broken\"\n[colors]\nheader_fg = \"#000000\"\n").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ChatError::Theme(_)));
    }

    #[test]
    fn resolve_falls_back_to_default() {
        assert_eq!(Theme::resolve(None, None).name, "catppuccin-mocha");
        assert_eq!(Theme::resolve(Some("nope"), None).name, "catppuccin-mocha");
        assert_eq!(
            Theme::resolve(Some("catppuccin-frappe"), Some("/does/not/exist.toml")).name,
            "catppuccin-frappe"
        );
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("ff8000"), "\u{1b}[48;2;255;128;0m");
        assert_eq!(Theme::fg("bogus"), "\u{1b}[38;2;255;255;255m");
    }
}
