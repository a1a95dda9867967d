//! Terminal rendering of a record table (impure shell).
//!
//! Widgets only read from [`RecordTable`]; user actions are forwarded to the
//! table by the embedding application.

pub mod confirm_dialog;
pub mod constants;
pub mod notice_pane;
pub mod pagination_bar;
pub mod record_table;
pub mod styles;

pub use confirm_dialog::{confirmation_prompt, render_confirm_dialog};
pub use notice_pane::NoticePane;
pub use pagination_bar::PaginationBar;
pub use record_table::RecordTableView;

use crate::model::Record;
use crate::state::RecordTable;
use constants::{NOTICE_PANE_HEIGHT, PAGINATION_BAR_HEIGHT};
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

/// Render one list surface: table, pagination bar, the notice pane when
/// visible, and the confirmation overlay while a deletion is pending.
pub fn render_surface<R: Record>(frame: &mut Frame, table: &RecordTable<R>, cursor: Option<usize>) {
    let notice_height = if table.notices().is_visible() {
        NOTICE_PANE_HEIGHT
    } else {
        0
    };

    let [table_area, bar_area, notice_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(PAGINATION_BAR_HEIGHT),
        Constraint::Length(notice_height),
    ])
    .areas(frame.area());

    frame.render_widget(
        RecordTableView::new(table).cursor(cursor).focused(true),
        table_area,
    );
    frame.render_widget(PaginationBar::new(table.page_window()), bar_area);
    if notice_height > 0 {
        frame.render_widget(NoticePane::new(table.notices(), false), notice_area);
    }

    if let Some(request) = table.pending_deletion() {
        render_confirm_dialog(frame, request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ColumnSpec;
    use crate::model::{StaffForm, StaffFormField};
    use crate::source::MemoryBackend;
    use crate::state::TableSettings;
    use crate::test_harness::{buffer_to_string, form_id, forms};
    use ratatui::{backend::TestBackend, Terminal};

    fn table() -> RecordTable<StaffForm> {
        let mut table = RecordTable::new(TableSettings::new(
            "staff-forms",
            StaffFormField::DEFAULT_SEARCH,
            ColumnSpec::new().field("Name", StaffFormField::FullName),
        ));
        table.refresh(&mut MemoryBackend::new(forms(12)));
        table
    }

    fn draw(table: &RecordTable<StaffForm>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal
            .draw(|frame| render_surface(frame, table, None))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn surface_shows_table_and_pagination() {
        let content = draw(&table());

        assert!(content.contains("staff-forms (12 of 12)"), "{content}");
        assert!(content.contains("< Prev [1] 2 Next >"), "{content}");
        assert!(!content.contains("Notices"), "{content}");
    }

    #[test]
    fn visible_notice_pane_is_rendered() {
        let mut table = table();
        table.notices_mut().toggle_visible();
        table.notices_mut().info("Exported 12 record(s) to staff-forms.csv");

        let content = draw(&table);

        assert!(content.contains("Notices"), "{content}");
        assert!(content.contains("Exported 12 record(s)"), "{content}");
    }

    #[test]
    fn pending_deletion_shows_dialog() {
        let mut table = table();
        table.request_delete_one(form_id(4)).unwrap();

        let content = draw(&table);

        assert!(content.contains("Delete record form-004?"), "{content}");
    }
}
