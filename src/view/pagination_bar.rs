//! Page navigation bar.
//!
//! Renders a [`PageWindow`] as one line: previous/next controls, the compact
//! page-number window with the current page bracketed, and a position
//! summary. Stateless; the window is computed by the table.

use super::styles::{CURRENT_PAGE, MUTED_TEXT};
use crate::state::{PageToken, PageWindow};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const PREVIOUS_LABEL: &str = "< Prev";
const NEXT_LABEL: &str = "Next >";

/// One-line pagination control: `< Prev 1 ... 5 [6] 7 ... 12 Next >` plus a summary.
#[derive(Debug, Clone, Copy)]
pub struct PaginationBar {
    window: PageWindow,
}

impl PaginationBar {
    /// Bar for `window`.
    pub fn new(window: PageWindow) -> Self {
        Self { window }
    }

    /// The bar as a styled line.
    pub fn line(&self) -> Line<'static> {
        let control = |label: &'static str, enabled: bool| {
            if enabled {
                Span::raw(label)
            } else {
                Span::styled(label, MUTED_TEXT)
            }
        };

        let mut spans = vec![control(PREVIOUS_LABEL, self.window.has_previous())];
        for token in self.window.tokens() {
            spans.push(Span::raw(" "));
            spans.push(match token {
                PageToken::Page(n) if n == self.window.page => {
                    Span::styled(format!("[{n}]"), CURRENT_PAGE)
                }
                PageToken::Page(n) => Span::raw(n.to_string()),
                PageToken::Ellipsis => Span::styled(token.to_string(), MUTED_TEXT),
            });
        }
        spans.push(Span::raw(" "));
        spans.push(control(NEXT_LABEL, self.window.has_next()));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(self.summary(), Style::default()));

        Line::from(spans)
    }

    fn summary(&self) -> String {
        if self.window.has_pages() {
            format!(
                "Page {} of {} | {} per page",
                self.window.page,
                self.window.total_pages(),
                self.window.page_size
            )
        } else {
            "No records".to_string()
        }
    }
}

impl Widget for PaginationBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}
