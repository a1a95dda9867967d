//! Tests for CSV rendering and the exporter.

use super::*;
use crate::model::{StaffForm, StaffFormField};
use crate::test_harness::{form, forms};
use std::io;

fn columns() -> ColumnSpec<StaffForm> {
    ColumnSpec::new()
        .field("Name", StaffFormField::FullName)
        .field("Staff No", StaffFormField::StaffNumber)
        .field("Phone", StaffFormField::Phone)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

struct FailingSink;

impl DownloadSink for FailingSink {
    fn deliver(&mut self, _file_name: &str, _contents: &[u8]) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

// ===== render_csv =====

#[test]
fn header_row_comes_first_and_every_cell_is_quoted() {
    let records = forms(2);
    let view: Vec<&StaffForm> = records.iter().collect();

    let csv = String::from_utf8(render_csv(&view, &columns()).unwrap()).unwrap();

    assert_eq!(
        csv,
        "\"Name\",\"Staff No\",\"Phone\"\n\
         \"Staff Member 1\",\"S-001\",\"\"\n\
         \"Staff Member 2\",\"S-002\",\"\"\n"
    );
}

#[test]
fn column_order_follows_column_spec_not_record() {
    let records = vec![form(7, "Ada", "HR")];
    let view: Vec<&StaffForm> = records.iter().collect();
    let columns = ColumnSpec::new()
        .field("Dept", StaffFormField::Department)
        .field("Id", StaffFormField::StaffNumber);

    let csv = String::from_utf8(render_csv(&view, &columns).unwrap()).unwrap();

    insta::assert_snapshot!(csv.trim_end(), @r###"
    "Dept","Id"
    "HR","S-007"
    "###);
}

#[test]
fn embedded_quotes_are_doubled() {
    let records = vec![form(1, "Ada \"Boss\" Obi", "HR")];
    let view: Vec<&StaffForm> = records.iter().collect();
    let columns = ColumnSpec::new().field("Name", StaffFormField::FullName);

    let csv = String::from_utf8(render_csv(&view, &columns).unwrap()).unwrap();

    assert_eq!(csv, "\"Name\"\n\"Ada \"\"Boss\"\" Obi\"\n");
}

#[test]
fn derived_column_uses_whole_record() {
    let records = vec![form(3, "Ada", "HR")];
    let view: Vec<&StaffForm> = records.iter().collect();
    let columns = ColumnSpec::new().derived("Label", |f: &StaffForm| {
        format!("{} ({})", f.full_name, f.department)
    });

    let csv = String::from_utf8(render_csv(&view, &columns).unwrap()).unwrap();

    assert_eq!(csv, "\"Label\"\n\"Ada (HR)\"\n");
}

#[test]
fn from_fields_uses_machine_names() {
    let columns: ColumnSpec<StaffForm> =
        ColumnSpec::from_fields(&[StaffFormField::Email, StaffFormField::Status]);
    let headers: Vec<&str> = columns.headers().collect();
    assert_eq!(headers, vec!["email", "status"]);
}

// ===== TabularExporter =====

#[test]
fn file_name_is_dataset_and_iso_date() {
    assert_eq!(export_file_name("staff-forms", date()), "staff-forms-2024-05-01.csv");
}

#[test]
fn export_delivers_all_rows() {
    let records = forms(23);
    let view: Vec<&StaffForm> = records.iter().collect();
    let exporter = TabularExporter::new("staff-forms", columns());
    let mut sink = MemorySink::new();

    let outcome = exporter.export_on(&view, &mut sink, date()).unwrap();

    assert_eq!(
        outcome,
        ExportOutcome::Delivered {
            file_name: "staff-forms-2024-05-01.csv".to_string(),
            location: "staff-forms-2024-05-01.csv".to_string(),
            rows: 23,
        }
    );
    let text = sink.last_text().unwrap();
    assert_eq!(text.lines().count(), 24, "header plus 23 rows");
}

#[test]
fn empty_view_is_refused_without_touching_sink() {
    let exporter = TabularExporter::new("staff-forms", columns());
    let mut sink = MemorySink::new();

    let outcome = exporter.export_on(&[], &mut sink, date()).unwrap();

    assert_eq!(outcome, ExportOutcome::Refused(RefusalReason::EmptyView));
    assert!(sink.files().is_empty());
}

#[test]
fn sink_failure_is_export_error() {
    let records = forms(1);
    let view: Vec<&StaffForm> = records.iter().collect();
    let exporter = TabularExporter::new("staff-forms", columns());

    let err = exporter.export_on(&view, &mut FailingSink, date()).unwrap_err();

    assert!(matches!(err, ExportError::Sink(_)));
    assert!(err.to_string().contains("read-only"));
}
