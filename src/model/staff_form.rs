//! Staff form records (the staff-forms list surface).

use super::identifiers::StaffFormId;
use super::record::{Record, RecordField};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a submitted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    /// Submitted and awaiting review.
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Sent back to the staff member.
    Rejected,
}

impl FormStatus {
    /// Lowercase name used in exports and field filters.
    pub fn as_str(self) -> &'static str {
        match self {
            FormStatus::Pending => "pending",
            FormStatus::Approved => "approved",
            FormStatus::Rejected => "rejected",
        }
    }
}

/// A staff member's submitted record form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffForm {
    /// Backend identifier.
    pub id: StaffFormId,
    /// Staff number printed on the form.
    pub staff_number: String,
    /// Staff member's full name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Optional contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Department the staff member belongs to.
    pub department: String,
    /// Job title.
    pub designation: String,
    /// Review status.
    pub status: FormStatus,
    /// Date the form was submitted.
    pub submitted_on: NaiveDate,
}

/// Fields of [`StaffForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StaffFormField {
    /// `staff_number`
    StaffNumber,
    /// `full_name`
    FullName,
    /// `email`
    Email,
    /// `phone`, absent for forms without one.
    Phone,
    /// `department`
    Department,
    /// `designation`
    Designation,
    /// `status`, as `pending`, `approved` or `rejected`.
    Status,
    /// `submitted_on`, formatted `YYYY-MM-DD`.
    SubmittedOn,
}

impl StaffFormField {
    /// Fields matched by the free-text search box unless configured otherwise.
    pub const DEFAULT_SEARCH: &'static [StaffFormField] = &[
        StaffFormField::FullName,
        StaffFormField::Email,
        StaffFormField::StaffNumber,
        StaffFormField::Department,
    ];
}

impl RecordField for StaffFormField {
    fn all() -> &'static [Self] {
        &[
            StaffFormField::StaffNumber,
            StaffFormField::FullName,
            StaffFormField::Email,
            StaffFormField::Phone,
            StaffFormField::Department,
            StaffFormField::Designation,
            StaffFormField::Status,
            StaffFormField::SubmittedOn,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            StaffFormField::StaffNumber => "staff_number",
            StaffFormField::FullName => "full_name",
            StaffFormField::Email => "email",
            StaffFormField::Phone => "phone",
            StaffFormField::Department => "department",
            StaffFormField::Designation => "designation",
            StaffFormField::Status => "status",
            StaffFormField::SubmittedOn => "submitted_on",
        }
    }
}

impl Record for StaffForm {
    type Id = StaffFormId;
    type Field = StaffFormField;

    fn id(&self) -> &StaffFormId {
        &self.id
    }

    fn field(&self, field: StaffFormField) -> Option<String> {
        match field {
            StaffFormField::StaffNumber => Some(self.staff_number.clone()),
            StaffFormField::FullName => Some(self.full_name.clone()),
            StaffFormField::Email => Some(self.email.clone()),
            StaffFormField::Phone => self.phone.clone(),
            StaffFormField::Department => Some(self.department.clone()),
            StaffFormField::Designation => Some(self.designation.clone()),
            StaffFormField::Status => Some(self.status.as_str().to_string()),
            StaffFormField::SubmittedOn => Some(self.submitted_on.format("%Y-%m-%d").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StaffForm {
        StaffForm {
            id: StaffFormId::new("f-1").unwrap(),
            staff_number: "S-100".to_string(),
            full_name: "Ada Obi".to_string(),
            email: "ada@example.org".to_string(),
            phone: None,
            department: "Finance".to_string(),
            designation: "Accountant".to_string(),
            status: FormStatus::Pending,
            submitted_on: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        }
    }

    #[test]
    fn missing_phone_is_absent_field() {
        assert_eq!(sample().field(StaffFormField::Phone), None);
    }

    #[test]
    fn submitted_on_renders_iso_date() {
        assert_eq!(
            sample().field(StaffFormField::SubmittedOn).as_deref(),
            Some("2024-03-09")
        );
    }

    #[test]
    fn status_renders_snake_case() {
        assert_eq!(sample().field(StaffFormField::Status).as_deref(), Some("pending"));
    }

    #[test]
    fn field_names_round_trip() {
        for field in StaffFormField::all() {
            assert_eq!(StaffFormField::from_name(field.name()), Some(*field));
        }
        assert_eq!(StaffFormField::from_name("salary"), None);
    }

    #[test]
    fn deserializes_from_backend_json() {
        let json = r#"{
            "id": "f-9",
            "staff_number": "S-9",
            "full_name": "Kemi Ade",
            "email": "kemi@example.org",
            "department": "HR",
            "designation": "Officer",
            "status": "approved",
            "submitted_on": "2024-01-31"
        }"#;
        let form: StaffForm = serde_json::from_str(json).expect("valid form json");
        assert_eq!(form.id.as_str(), "f-9");
        assert_eq!(form.phone, None);
        assert_eq!(form.status, FormStatus::Approved);
    }
}
