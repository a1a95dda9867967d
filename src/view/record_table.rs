//! Record table widget.
//!
//! Renders the current page of a [`RecordTable`]: a selection marker column
//! followed by the export columns, a header row whose marker reflects the
//! select-page state, and the fetch state when there is nothing to show.
//! The cursor row is owned by the caller.

use super::styles::{border_style, CURSOR_ROW, DANGER, MUTED_TEXT, SECTION_HEADER, SELECTED_ROW};
use crate::model::Record;
use crate::state::{FetchState, RecordTable};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";

/// The current page of a [`RecordTable`] with selection markers.
///
/// While a fetch is loading or has failed, a placeholder replaces the rows.
pub struct RecordTableView<'a, R: Record> {
    table: &'a RecordTable<R>,
    cursor: Option<usize>,
    focused: bool,
}

impl<'a, R: Record> RecordTableView<'a, R> {
    /// View over `table`, without cursor or focus.
    pub fn new(table: &'a RecordTable<R>) -> Self {
        Self {
            table,
            cursor: None,
            focused: false,
        }
    }

    /// Highlight the `index`-th row of the current page.
    pub fn cursor(mut self, index: Option<usize>) -> Self {
        self.cursor = index;
        self
    }

    /// Draw the border in the focused style.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn block(&self) -> Block<'static> {
        let table = self.table;
        let mut block = Block::default()
            .title(format!(
                " {} ({} of {}) ",
                table.exporter().dataset_name(),
                table.filtered_len(),
                table.records().len()
            ))
            .borders(Borders::ALL)
            .border_style(border_style(self.focused));

        if !table.selection().is_empty() {
            block = block.title_bottom(format!(" {} selected ", table.selection().len()));
        }
        block
    }

    /// Message shown instead of rows, if any.
    fn placeholder(&self) -> Option<Vec<Line<'static>>> {
        match self.table.fetch_state() {
            FetchState::Failed { message } => Some(vec![
                Line::from(Span::styled(message.clone(), DANGER)),
                Line::from(Span::styled("Press r to retry", MUTED_TEXT)),
            ]),
            FetchState::Loading if self.table.records().is_empty() => Some(vec![Line::from(
                Span::styled("Loading records...", MUTED_TEXT),
            )]),
            _ if self.table.filtered_len() == 0 => Some(vec![Line::from(Span::styled(
                "No records found",
                MUTED_TEXT,
            ))]),
            _ => None,
        }
    }

    fn header(&self) -> Row<'static> {
        let marker = if self.table.is_page_selected() {
            CHECKED
        } else {
            UNCHECKED
        };
        let cells = std::iter::once(Cell::from(marker)).chain(
            self.table
                .exporter()
                .columns()
                .headers()
                .map(|h| Cell::from(h.to_string())),
        );
        Row::new(cells).style(SECTION_HEADER)
    }

    fn rows(&self) -> Vec<Row<'static>> {
        let columns = self.table.exporter().columns().columns();
        self.table
            .page_items()
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let selected = self.table.is_selected(record.id());
                let marker = if selected { CHECKED } else { UNCHECKED };
                let cells = std::iter::once(Cell::from(marker))
                    .chain(columns.iter().map(|c| Cell::from(c.accessor.cell(record))));

                let mut row = Row::new(cells);
                if selected {
                    row = row.style(SELECTED_ROW);
                }
                if self.cursor == Some(index) {
                    row = row.style(CURSOR_ROW);
                }
                row
            })
            .collect()
    }
}

impl<R: Record> Widget for RecordTableView<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();

        if let Some(lines) = self.placeholder() {
            Paragraph::new(lines).block(block).render(area, buf);
            return;
        }

        let column_count = self.table.exporter().columns().columns().len();
        let widths = std::iter::once(Constraint::Length(3))
            .chain(std::iter::repeat(Constraint::Fill(1)).take(column_count));

        Table::new(self.rows(), widths)
            .header(self.header())
            .column_spacing(1)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
#[path = "record_table_tests.rs"]
mod tests;
