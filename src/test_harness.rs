//! Shared fixtures for whitebox tests.
//!
//! Builds staff forms and portal users with predictable ids and field values
//! so tests can reason about positions in the superset.

use crate::model::{
    AccountStatus, FormStatus, PortalUser, StaffForm, StaffFormId, UserId, UserRole,
};
use chrono::NaiveDate;

/// Build a staff form whose id and staff number derive from `n`.
pub fn form(n: usize, full_name: &str, department: &str) -> StaffForm {
    StaffForm {
        id: StaffFormId::new(format!("form-{n:03}")).expect("fixture id is non-empty"),
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

pub fn form_id(n: usize) -> StaffFormId {
    StaffFormId::new(format!("form-{n:03}")).expect("fixture id is non-empty")
}

pub fn user(n: usize, username: &str, role: UserRole) -> PortalUser {
    PortalUser {
        id: UserId::new(format!("user-{n}")).expect("fixture id is non-empty"),
        username: username.to_string(),
        full_name: format!("User {n}"),
        email: format!("{username}@example.org"),
        role,
        status: AccountStatus::Active,
    }
}

/// Convert a ratatui buffer to a string, one line per row, trailing blanks removed.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}
