//! Shared styles for the record views.

use crate::state::NoticeLevel;
use ratatui::style::{Color, Modifier, Style};

/// Secondary text: hints, disabled navigation, empty states.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Column headers and widget titles.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Rows whose record is in the selection.
pub const SELECTED_ROW: Style = Style::new().fg(Color::Yellow);

/// The row under the cursor.
pub const CURSOR_ROW: Style = Style::new().add_modifier(Modifier::REVERSED);

/// The current page number in the pagination bar.
pub const CURRENT_PAGE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Blocking errors and destructive prompts.
pub const DANGER: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Border colour for the focused widget.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::new().fg(Color::Yellow)
    } else {
        Style::new().fg(Color::White)
    }
}

/// Colour-coded notice levels: Error=Red, Warning=Yellow, Info=Cyan.
pub fn style_for_level(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Error => Style::new().fg(Color::Red),
        NoticeLevel::Warning => Style::new().fg(Color::Yellow),
        NoticeLevel::Info => Style::new().fg(Color::Cyan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_have_distinct_colours() {
        let styles = [
            style_for_level(NoticeLevel::Info),
            style_for_level(NoticeLevel::Warning),
            style_for_level(NoticeLevel::Error),
        ];
        assert_ne!(styles[0], styles[1]);
        assert_ne!(styles[1], styles[2]);
        assert_eq!(styles[2].fg, Some(Color::Red));
    }

    #[test]
    fn focused_border_is_highlighted() {
        assert_ne!(border_style(true), border_style(false));
    }
}
