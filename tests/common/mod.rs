//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use staffdb::export::ColumnSpec;
use staffdb::model::{FormStatus, StaffForm, StaffFormField, StaffFormId};
use staffdb::source::MemoryBackend;
use staffdb::state::{PageSize, RecordTable, TableSettings};

pub fn form_id(n: usize) -> StaffFormId {
    StaffFormId::new(format!("form-{n:03}")).expect("fixture id is non-empty")
}

pub fn form(n: usize, full_name: &str, department: &str) -> StaffForm {
    StaffForm {
        id: form_id(n),
        staff_number: format!("S-{n:03}"),
        full_name: full_name.to_string(),
        email: format!("staff{n}@example.org"),
        phone: None,
        department: department.to_string(),
        designation: "Officer".to_string(),
        status: FormStatus::Pending,
        submitted_on: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
    }
}

/// `count` forms numbered from 1, alternating Finance/HR departments.
pub fn forms(count: usize) -> Vec<StaffForm> {
    (1..=count)
        .map(|n| {
            let department = if n % 2 == 0 { "HR" } else { "Finance" };
            form(n, &format!("Staff Member {n}"), department)
        })
        .collect()
}

pub fn settings(page_size: usize) -> TableSettings<StaffForm> {
    TableSettings::new(
        "staff-forms",
        StaffFormField::DEFAULT_SEARCH,
        ColumnSpec::new()
            .field("Staff Number", StaffFormField::StaffNumber)
            .field("Full Name", StaffFormField::FullName),
    )
    .with_page_size(PageSize::new(page_size).expect("positive page size"))
}

/// A table loaded from a fresh in-memory backend holding `forms(count)`.
pub fn loaded_table(
    count: usize,
    page_size: usize,
) -> (RecordTable<StaffForm>, MemoryBackend<StaffForm>) {
    let mut backend = MemoryBackend::new(forms(count));
    let mut table = RecordTable::new(settings(page_size));
    table.refresh(&mut backend);
    (table, backend)
}
