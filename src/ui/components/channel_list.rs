//! Channel list renderer.
//!
//! Rows arrive already clipped to the pane width, so drawing is a matter of
//! picking colors: the cursor row in selection colors across the full width,
//! unread channels in the unread color, and direct-message icons tinted by
//! presence.

use crate::domain::Presence;
use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChannelRow;

/// Characters before the icon in a row: notification marker and a space.
const ICON_COLUMN: usize = 2;

/// Renders `rows` starting at `row` and blanks the rest of a `height`-row
/// viewport. Returns the row after the viewport.
pub fn render_channel_list(
    row: usize,
    rows: &[ChannelRow],
    height: usize,
    theme: &Theme,
    cols: usize,
) -> usize {
    for (offset, channel) in rows.iter().take(height).enumerate() {
        render_channel_row(row + offset, channel, theme);
    }

    for blank in rows.len().min(height)..height {
        position_cursor(row + blank, 1);
        print!("{}", " ".repeat(cols));
    }

    row + height
}

fn render_channel_row(row: usize, channel: &ChannelRow, theme: &Theme) {
    position_cursor(row, 1);

    if channel.is_cursor {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("{}", Theme::bold());
        print!("{}", channel.text);
        print!("{}", Theme::reset());
        return;
    }

    let base = if channel.has_unread {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.unread_fg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    let icon_color = match channel.presence {
        Some(Presence::Away) => Some(&theme.colors.presence_away_fg),
        Some(Presence::Active) => Some(&theme.colors.presence_active_fg),
        Some(Presence::Unknown) | None => None,
    };

    print!("{base}");
    match icon_color {
        Some(color) if channel.highlight_ranges.is_empty() => {
            // Split around the icon so only it picks up the presence tint.
            let prefix: String = channel.text.chars().take(ICON_COLUMN).collect();
            let icon: String = channel.text.chars().skip(ICON_COLUMN).take(1).collect();
            let rest: String = channel.text.chars().skip(ICON_COLUMN + 1).collect();
            print!("{prefix}{}{icon}{base}{rest}", Theme::fg(color));
        }
        _ => helpers::render_highlighted_text(&channel.text, &channel.highlight_ranges, theme, &base),
    }
    print!("{}", Theme::reset());
}
