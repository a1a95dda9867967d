//! Acceptance tests for the record engine scenarios.
//!
//! Each test drives a `RecordTable` against a backend the way a list surface
//! does and checks the observable outcome.

mod common;

use chrono::NaiveDate;
use common::{form_id, forms, loaded_table, settings};
use staffdb::export::{ExportOutcome, MemorySink, RefusalReason};
use staffdb::model::{StaffForm, StaffFormField};
use staffdb::source::{JsonFileBackend, MemoryBackend};
use staffdb::state::{BulkActionState, FetchState, NoticeLevel, RecordTable};

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
}

// ===== Scenario 1: Pagination =====

#[test]
fn scenario_twenty_three_records_page_size_ten() {
    // GIVEN 23 records and page size 10
    let (mut table, _backend) = loaded_table(23, 10);

    // THEN there are three pages
    assert_eq!(table.total_pages(), 3);

    // WHEN moving to page 2
    table.go_to_page(2);

    // THEN items 11 through 20 are shown
    let numbers: Vec<String> = table
        .page_items()
        .iter()
        .map(|f| f.staff_number.clone())
        .collect();
    let expected: Vec<String> = (11..=20).map(|n| format!("S-{n:03}")).collect();
    assert_eq!(numbers, expected);
}

// ===== Scenario 2: Search =====

#[test]
fn scenario_search_john_over_fifty_records() {
    // GIVEN 50 records where 3 mention "John" in a searchable field
    let mut records = forms(50);
    records[2].full_name = "John Mensah".to_string();
    records[17].full_name = "Mary JOHNSTON".to_string();
    records[33].email = "johnp@example.org".to_string();
    let mut backend = MemoryBackend::new(records);
    let mut table = RecordTable::new(settings(10));
    table.refresh(&mut backend);

    // WHEN searching for lowercase "john"
    table.set_search_text("john");

    // THEN exactly those 3 remain, in superset order
    let ids: Vec<_> = table.filtered_view().iter().map(|f| f.id.clone()).collect();
    assert_eq!(ids, vec![form_id(3), form_id(18), form_id(34)]);
}

// ===== Scenario 3: Bulk delete with self-healing pagination =====

#[test]
fn scenario_delete_page_two_then_heal_from_page_three() {
    // GIVEN 23 records, page size 10, all of page 2 selected
    let (mut table, mut backend) = loaded_table(23, 10);
    table.go_to_page(2);
    table.toggle_select_page();
    assert_eq!(table.selection().len(), 10);

    // AND the user is viewing page 3
    table.go_to_page(3);

    // WHEN the selection is deleted and confirmed
    table.request_delete_selected().expect("selection is non-empty");
    let report = table
        .confirm_delete(&mut backend)
        .expect("backend accepts the batch");

    // THEN 13 records remain over 2 pages, and page 3 healed to page 2
    assert_eq!(report.deleted.len(), 10);
    assert_eq!(backend.records().len(), 13);
    assert_eq!(table.records().len(), 13);
    assert_eq!(table.total_pages(), 2);
    assert_eq!(table.page(), 2);
    assert!(table.selection().is_empty());
}

// ===== Scenario 4: Empty export =====

#[test]
fn scenario_export_with_empty_view_is_refused() {
    // GIVEN a filter that matches nothing
    let (mut table, _backend) = loaded_table(10, 10);
    table.set_field_filter(StaffFormField::Department, "Legal");
    let mut sink = MemorySink::new();

    // WHEN exporting
    let outcome = table
        .export_on(&mut sink, export_date())
        .expect("refusal is not an error");

    // THEN no file is produced and the caller is told why
    assert_eq!(outcome, ExportOutcome::Refused(RefusalReason::EmptyView));
    assert!(sink.files().is_empty());
}

// ===== Error handling =====

#[test]
fn mutation_failure_rolls_back_to_pre_attempt_state() {
    let (mut table, mut backend) = loaded_table(15, 10);
    table.go_to_page(2);
    table.toggle_select_page();
    backend.set_offline(true);
    table.request_delete_selected().expect("selection is non-empty");

    let result = table.confirm_delete(&mut backend);

    assert!(result.is_err());
    assert_eq!(table.selection().len(), 5);
    assert_eq!(table.page(), 2);
    let notice = table.notices().latest().expect("failure notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Something went wrong. Please try again.");
    assert!(matches!(
        table.deletion_state(),
        BulkActionState::Failed { .. }
    ));

    // The user retries once the backend is back.
    backend.set_offline(false);
    table.request_delete_selected().expect("failed state accepts a new request");
    table.confirm_delete(&mut backend).expect("retry succeeds");
    assert_eq!(table.records().len(), 10);
    assert_eq!(table.page(), 1);
}

#[test]
fn fetch_failure_is_blocking_state_with_retry() {
    let mut backend = MemoryBackend::new(forms(4));
    backend.set_offline(true);
    let mut table = RecordTable::new(settings(10));

    table.refresh(&mut backend);
    assert!(matches!(table.fetch_state(), FetchState::Failed { .. }));
    assert!(table.notices().entries().is_empty());

    backend.set_offline(false);
    table.refresh(&mut backend);
    assert_eq!(table.fetch_state(), &FetchState::Loaded);
    assert_eq!(table.filtered_len(), 4);
}

#[test]
fn stale_selection_is_pruned_silently_after_external_change() {
    let (mut table, mut backend) = loaded_table(5, 10);
    table.toggle_selection(&form_id(5));
    table.toggle_selection(&form_id(1));

    // Another administrator removes record 5.
    let mut other_session = RecordTable::new(settings(10));
    other_session.refresh(&mut backend);
    other_session.request_delete_one(form_id(5)).expect("idle");
    other_session.confirm_delete(&mut backend).expect("deleted");

    table.refresh(&mut backend);

    assert_eq!(table.selection().ids(), vec![form_id(1)]);
    assert!(table.notices().entries().is_empty());
}

// ===== File backend =====

#[test]
fn json_file_backend_round_trip_through_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut backend: JsonFileBackend<StaffForm> = JsonFileBackend::new(dir.path().join("forms.json"));
    backend.save_all(&forms(12)).expect("seed file");
    let mut table = RecordTable::new(settings(5));
    table.refresh(&mut backend);

    table.set_field_filter(StaffFormField::Department, "HR");
    table.toggle_select_page();
    table.request_delete_selected().expect("selection is non-empty");
    table.confirm_delete(&mut backend).expect("file backend deletes");

    let mut reread: JsonFileBackend<StaffForm> = JsonFileBackend::new(dir.path().join("forms.json"));
    let mut fresh = RecordTable::new(settings(5));
    fresh.refresh(&mut reread);
    assert_eq!(fresh.records().len(), 7);
    assert_eq!(table.filtered_len(), 1);

    let mut sink = MemorySink::new();
    let outcome = fresh.export_on(&mut sink, export_date()).expect("export");
    assert!(matches!(outcome, ExportOutcome::Delivered { rows: 7, .. }));
    assert_eq!(sink.files()[0].0, "staff-forms-2024-05-01.csv");
}
