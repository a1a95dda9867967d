//! Notice pane widget for transient notifications.

use super::styles::{border_style, style_for_level, MUTED_TEXT};
use crate::state::{Notice, NoticeLevel, NoticeLog};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

// ===== NoticePane Widget =====

/// Renders the newest notices that fit, newest at the bottom.
///
/// Each line shows an `HH:MM:SS` timestamp, a colour-coded level and the
/// message. The title reads "Notices" or "Notices [N new]" while unread
/// notices exist.
pub struct NoticePane<'a> {
    log: &'a NoticeLog,
    focused: bool,
}

impl<'a> NoticePane<'a> {
    /// Pane over `log`; `focused` picks the border style.
    pub fn new(log: &'a NoticeLog, focused: bool) -> Self {
        Self { log, focused }
    }

    fn title(&self) -> String {
        match self.log.unread_count() {
            0 => " Notices ".to_string(),
            n => format!(" Notices [{n} new] "),
        }
    }
}

impl Widget for NoticePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(border_style(self.focused));

        let capacity = usize::from(area.height.saturating_sub(2));
        let entries = self.log.entries();
        let lines: Vec<Line> = if entries.is_empty() {
            vec![Line::from(Span::styled("No notices", MUTED_TEXT))]
        } else {
            entries
                .iter()
                .skip(entries.len().saturating_sub(capacity))
                .map(notice_line)
                .collect()
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

fn level_label(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "INFO",
        NoticeLevel::Warning => "WARN",
        NoticeLevel::Error => "ERROR",
    }
}

fn notice_line(notice: &Notice) -> Line<'static> {
    Line::from(vec![
        Span::styled(format_timestamp(notice), MUTED_TEXT),
        Span::raw(" "),
        Span::styled(
            format!("{:<5}", level_label(notice.level)),
            style_for_level(notice.level),
        ),
        Span::raw(" "),
        Span::raw(notice.message.clone()),
    ])
}

/// `HH:MM:SS` of the notice's UTC timestamp.
fn format_timestamp(notice: &Notice) -> String {
    notice.timestamp.format("%H:%M:%S").to_string()
}
