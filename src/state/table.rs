//! The record table: one list surface's complete engine state.
//!
//! `RecordTable` owns the superset and composes the filter, pagination,
//! selection, deletion, fetch and export pieces. The view layer reads
//! derived values from it and forwards user actions to it; it never mutates
//! the pieces directly.
//!
//! # Derived state
//!
//! The filtered view (kept as superset positions) is recomputed eagerly
//! whenever the superset or the criteria change. Page items and the page
//! window are computed on demand from it. Changing the criteria or the page
//! size returns to page 1; shrinking the superset under the current page
//! steps back to the last page that still exists.

use crate::export::{ColumnSpec, DownloadSink, ExportOutcome, RefusalReason, TabularExporter};
use crate::model::error::{BackendError, BulkActionError, ExportError};
use crate::model::Record;
use crate::source::{DeleteReport, RecordBackend};
use crate::state::bulk_action::{BulkActionCoordinator, BulkActionState, DeletionRequest};
use crate::state::fetch::{FetchResolution, FetchState, FetchTicket, FetchTracker};
use crate::state::filter::{FilterCriteria, FilterEngine};
use crate::state::notices::{NoticeLog, DEFAULT_NOTICE_CAPACITY};
use crate::state::pagination::{default_page_size_options, PageSize, PageToken, PageWindow};
use crate::state::selection::SelectionTracker;
use std::collections::HashSet;
use tracing::{debug, info, warn};

// ===== TableSettings =====

/// Per-surface configuration of a [`RecordTable`].
#[derive(Debug, Clone)]
pub struct TableSettings<R: Record> {
    /// Base name of export files.
    pub dataset_name: String,
    /// Fields the search box matches against.
    pub search_fields: Vec<R::Field>,
    /// Export columns.
    pub columns: ColumnSpec<R>,
    /// Initial rows per page.
    pub page_size: PageSize,
    /// Page sizes the user may switch between.
    pub page_size_options: Vec<PageSize>,
    /// Notices retained by the surface.
    pub notice_capacity: usize,
}

impl<R: Record> TableSettings<R> {
    /// Settings with the default page size, page-size options and notice capacity.
    pub fn new(
        dataset_name: impl Into<String>,
        search_fields: impl Into<Vec<R::Field>>,
        columns: ColumnSpec<R>,
    ) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            search_fields: search_fields.into(),
            columns,
            page_size: PageSize::default(),
            page_size_options: default_page_size_options(),
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }

    /// Initial rows per page.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Page sizes the user may switch between. The initial page size is
    /// always offered, even when missing from `options`.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<PageSize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Maximum notices retained.
    pub fn with_notice_capacity(mut self, capacity: usize) -> Self {
        self.notice_capacity = capacity;
        self
    }
}

// ===== RecordTable =====

/// Engine state of one list surface.
///
/// Holds the fetched superset and everything derived from it. All methods are
/// synchronous; backend calls happen only in [`refresh`](Self::refresh) and
/// [`confirm_delete`](Self::confirm_delete).
#[derive(Debug, Clone)]
pub struct RecordTable<R: Record> {
    /// Superset as last fetched, in backend order.
    records: Vec<R>,
    criteria: FilterCriteria<R::Field>,
    filter: FilterEngine<R::Field>,
    /// Superset positions of the filtered view, ascending.
    filtered: Vec<usize>,
    page: usize,
    page_size: PageSize,
    /// Ascending, deduplicated, always contains `page_size`.
    page_size_options: Vec<PageSize>,
    selection: SelectionTracker<R::Id>,
    deletion: BulkActionCoordinator<R::Id>,
    fetch: FetchTracker,
    exporter: TabularExporter<R>,
    notices: NoticeLog,
    /// Server-side narrowing value used instead of a full listing.
    remote_query: Option<String>,
}

impl<R: Record> RecordTable<R> {
    /// Empty table on page 1, no fetch issued yet.
    pub fn new(settings: TableSettings<R>) -> Self {
        let mut page_size_options = settings.page_size_options;
        page_size_options.push(settings.page_size);
        page_size_options.sort();
        page_size_options.dedup();

        Self {
            records: Vec::new(),
            criteria: FilterCriteria::new(),
            filter: FilterEngine::new(settings.search_fields),
            filtered: Vec::new(),
            page: 1,
            page_size: settings.page_size,
            page_size_options,
            selection: SelectionTracker::new(),
            deletion: BulkActionCoordinator::new(),
            fetch: FetchTracker::new(),
            exporter: TabularExporter::new(settings.dataset_name, settings.columns),
            notices: NoticeLog::new(settings.notice_capacity),
            remote_query: None,
        }
    }

    // ===== Superset =====

    /// Every record as last fetched.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Replace the superset.
    ///
    /// Recomputes the filtered view, prunes the selection against the new
    /// ids and steps the page back if it no longer exists.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.recompute();

        let pruned = self.selection.prune(self.records.iter().map(|r| r.id()));
        if pruned > 0 {
            debug!(pruned, "dropped stale selections");
        }
        self.heal_page();
    }

    /// Start a fetch; pair the ticket with [`complete_refresh`](Self::complete_refresh).
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.fetch.begin()
    }

    /// Apply a fetch response.
    ///
    /// Stale responses are ignored. A failure leaves the superset and the
    /// selection untouched and puts the table in [`FetchState::Failed`].
    pub fn complete_refresh(&mut self, ticket: FetchTicket, result: Result<Vec<R>, BackendError>) {
        match self.fetch.complete(ticket, result) {
            FetchResolution::Applied(records) => {
                info!(
                    dataset = %self.exporter.dataset_name(),
                    count = records.len(),
                    "records refreshed"
                );
                self.replace_records(records);
            }
            FetchResolution::Failed(err) => {
                warn!(dataset = %self.exporter.dataset_name(), error = %err, "refresh failed");
            }
            FetchResolution::Stale => {}
        }
    }

    /// Fetch the superset from `backend` and apply it.
    ///
    /// Uses `search_by_field` when a remote query is set, `list_records`
    /// otherwise. Also serves as the retry action after a failed fetch.
    pub fn refresh<B>(&mut self, backend: &mut B)
    where
        B: RecordBackend<R> + ?Sized,
    {
        let ticket = self.begin_refresh();
        let result = match &self.remote_query {
            Some(value) => backend.search_by_field(value),
            None => backend.list_records(),
        };
        self.complete_refresh(ticket, result);
    }

    /// Lifecycle of the latest fetch.
    pub fn fetch_state(&self) -> &FetchState {
        self.fetch.state()
    }

    /// Narrow fetches server-side by `value`; `None` returns to full listings.
    ///
    /// Takes effect on the next refresh. Returns to page 1.
    pub fn set_remote_query(&mut self, value: Option<String>) {
        self.remote_query = value.filter(|v| !v.trim().is_empty());
        self.page = 1;
    }

    /// Active server-side narrowing value.
    pub fn remote_query(&self) -> Option<&str> {
        self.remote_query.as_deref()
    }

    // ===== Filtering =====

    /// Current filter criteria.
    pub fn criteria(&self) -> &FilterCriteria<R::Field> {
        &self.criteria
    }

    /// Replace the search text and return to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.criteria.set_search_text(text);
        self.criteria_changed();
    }

    /// Require `field` to equal `value`; an empty value removes the filter. Returns to page 1.
    pub fn set_field_filter(&mut self, field: R::Field, value: impl Into<String>) {
        self.criteria.set_field_filter(field, value);
        self.criteria_changed();
    }

    /// Remove the filter on `field` and return to page 1.
    pub fn clear_field_filter(&mut self, field: R::Field) {
        self.criteria.clear_field_filter(field);
        self.criteria_changed();
    }

    /// Replace all criteria and return to page 1.
    pub fn set_criteria(&mut self, criteria: FilterCriteria<R::Field>) {
        self.criteria = criteria;
        self.criteria_changed();
    }

    /// Drop every criterion and return to page 1.
    pub fn clear_criteria(&mut self) {
        self.set_criteria(FilterCriteria::new());
    }

    fn criteria_changed(&mut self) {
        self.recompute();
        self.page = 1;
        debug!(matches = self.filtered.len(), "filter criteria changed");
    }

    fn recompute(&mut self) {
        self.filtered = self.filter.matching_indices(&self.records, &self.criteria);
    }

    /// Every record matching the criteria, in superset order.
    pub fn filtered_view(&self) -> Vec<&R> {
        self.filtered.iter().map(|&i| &self.records[i]).collect()
    }

    /// Number of records in the filtered view.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    // ===== Pagination =====

    /// Page position over the filtered view.
    pub fn page_window(&self) -> PageWindow {
        PageWindow::new(self.page, self.page_size, self.filtered.len())
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Pages in the filtered view; 0 when it is empty.
    pub fn total_pages(&self) -> usize {
        self.page_window().total_pages()
    }

    /// Records on the current page.
    pub fn page_items(&self) -> Vec<&R> {
        self.filtered[self.page_window().item_range()]
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// Page-number window for the navigation control.
    pub fn page_tokens(&self) -> Vec<PageToken> {
        self.page_window().tokens()
    }

    /// Jump to `page`, clamped to the existing pages (at least 1).
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    /// Advance one page, stopping at the last.
    pub fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1));
    }

    /// Go back one page, stopping at the first.
    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    /// Page sizes this surface offers, ascending.
    pub fn page_size_options(&self) -> &[PageSize] {
        &self.page_size_options
    }

    /// Change the page size and return to page 1.
    ///
    /// Sizes outside [`page_size_options`](Self::page_size_options) are
    /// rejected and leave the table untouched; returns whether the size applied.
    pub fn set_page_size(&mut self, page_size: PageSize) -> bool {
        if !self.page_size_options.contains(&page_size) {
            warn!(requested = %page_size, "page size is not one of the offered options");
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    /// Switch to the next larger offered page size, wrapping to the smallest.
    pub fn cycle_page_size(&mut self) -> PageSize {
        let next = self
            .page_size_options
            .iter()
            .copied()
            .find(|&size| size > self.page_size)
            .or_else(|| self.page_size_options.first().copied())
            .unwrap_or(self.page_size);
        self.set_page_size(next);
        next
    }

    fn heal_page(&mut self) {
        if let Some(healed) = self.page_window().healed_page() {
            info!(from = self.page, to = healed, "current page no longer exists");
            self.page = healed;
        }
    }

    // ===== Selection =====

    /// Ids selected across all pages.
    pub fn selection(&self) -> &SelectionTracker<R::Id> {
        &self.selection
    }

    /// Select or deselect one record.
    pub fn toggle_selection(&mut self, id: &R::Id) {
        self.selection.toggle(id);
    }

    /// Select every record on the current page, or deselect them all if
    /// they already are. Other pages keep their selection.
    pub fn toggle_select_page(&mut self) {
        let visible: Vec<R::Id> = self.page_items().iter().map(|r| r.id().clone()).collect();
        self.selection.toggle_all_visible(&visible);
    }

    /// True when every record on the current page is selected.
    pub fn is_page_selected(&self) -> bool {
        self.selection
            .all_selected(self.page_items().into_iter().map(|r| r.id()))
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &R::Id) -> bool {
        self.selection.is_selected(id)
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ===== Deletion =====

    /// Where the current deletion stands.
    pub fn deletion_state(&self) -> &BulkActionState<R::Id> {
        self.deletion.state()
    }

    /// The deletion awaiting confirmation, if any.
    pub fn pending_deletion(&self) -> Option<&DeletionRequest<R::Id>> {
        self.deletion.pending()
    }

    /// Ask to delete one record; it is not deleted until confirmed.
    pub fn request_delete_one(&mut self, id: R::Id) -> Result<(), BulkActionError> {
        self.deletion.request_delete_one(id)
    }

    /// Ask to delete every selected record, on every page.
    pub fn request_delete_selected(&mut self) -> Result<(), BulkActionError> {
        self.deletion.request_delete_many(self.selection.ids())
    }

    /// Ask to delete an explicit batch of records.
    pub fn request_delete_many(&mut self, ids: Vec<R::Id>) -> Result<(), BulkActionError> {
        self.deletion.request_delete_many(ids)
    }

    /// Abandon the pending deletion.
    pub fn cancel_delete(&mut self) -> Result<(), BulkActionError> {
        self.deletion.cancel().map(|_| ())
    }

    /// Confirm the pending deletion and dispatch it to `backend`.
    ///
    /// On success (full or partial) the deleted ids leave the selection and
    /// the superset, the page is healed, and the superset is refetched. On
    /// failure selection and pagination are left exactly as they were and
    /// an error notice carries the backend's message.
    pub fn confirm_delete<B>(
        &mut self,
        backend: &mut B,
    ) -> Result<DeleteReport<R::Id>, BulkActionError>
    where
        B: RecordBackend<R> + ?Sized,
    {
        let report = match self.deletion.execute::<R, B>(backend) {
            Ok(report) => report,
            Err(err) => {
                if let BulkActionError::Backend(_) = &err {
                    self.notices.error(err.to_string());
                }
                return Err(err);
            }
        };

        self.selection.remove_all(&report.deleted);
        self.drop_deleted(&report.deleted);

        if report.is_complete() {
            self.notices
                .info(format!("Deleted {} record(s)", report.deleted.len()));
        } else {
            let reasons: Vec<String> = report
                .rejected
                .iter()
                .map(|(id, reason)| format!("{id}: {reason}"))
                .collect();
            self.notices.warning(format!(
                "Deleted {} record(s); {} could not be deleted ({})",
                report.deleted.len(),
                report.rejected.len(),
                reasons.join("; ")
            ));
        }

        self.refresh(backend);
        Ok(report)
    }

    /// Remove deleted records locally so pagination heals even if the
    /// follow-up refresh fails.
    fn drop_deleted(&mut self, deleted: &[R::Id]) {
        let doomed: HashSet<&R::Id> = deleted.iter().collect();
        self.records.retain(|r| !doomed.contains(r.id()));
        self.recompute();
        self.heal_page();
    }

    /// Return a finished deletion to idle once the view has shown it.
    pub fn acknowledge_deletion(&mut self) {
        self.deletion.acknowledge();
    }

    // ===== Export =====

    /// Exporter configured for this surface.
    pub fn exporter(&self) -> &TabularExporter<R> {
        &self.exporter
    }

    /// Export the whole filtered view (not just the current page).
    ///
    /// An empty view is refused with an info notice.
    pub fn export(&mut self, sink: &mut dyn DownloadSink) -> Result<ExportOutcome, ExportError> {
        let outcome = self.exporter.export(&self.filtered_view(), sink);
        self.note_export(&outcome);
        outcome
    }

    /// [`export`](Self::export) with an explicit date stamp.
    pub fn export_on(
        &mut self,
        sink: &mut dyn DownloadSink,
        date: chrono::NaiveDate,
    ) -> Result<ExportOutcome, ExportError> {
        let outcome = self.exporter.export_on(&self.filtered_view(), sink, date);
        self.note_export(&outcome);
        outcome
    }

    fn note_export(&mut self, outcome: &Result<ExportOutcome, ExportError>) {
        match outcome {
            Ok(ExportOutcome::Delivered { file_name, rows, .. }) => {
                self.notices
                    .info(format!("Exported {rows} record(s) to {file_name}"));
            }
            Ok(ExportOutcome::Refused(RefusalReason::EmptyView)) => {
                self.notices.info("There are no records to export");
            }
            Err(err) => self.notices.error(err.to_string()),
        }
    }

    // ===== Notices =====

    /// Notices raised by this surface.
    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    /// Mutable notices, for toggling visibility or dismissing entries.
    pub fn notices_mut(&mut self) -> &mut NoticeLog {
        &mut self.notices
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
