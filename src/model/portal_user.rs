//! Portal user accounts (the user-management list surface).

use super::identifiers::UserId;
use super::record::{Record, RecordField};
use serde::{Deserialize, Serialize};

/// Permission level of a portal account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, including user management.
    Admin,
    /// Regular staff access.
    Staff,
}

/// Whether an account may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Can sign in.
    Active,
    /// Blocked from signing in.
    Suspended,
}

/// An account that can sign in to the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalUser {
    /// Backend identifier.
    pub id: UserId,
    /// Sign-in name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Permission level.
    pub role: UserRole,
    /// Whether the account may sign in.
    pub status: AccountStatus,
}

/// Fields of [`PortalUser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PortalUserField {
    /// `username`
    Username,
    /// `full_name`
    FullName,
    /// `email`
    Email,
    /// `role`, as `admin` or `staff`.
    Role,
    /// `status`, as `active` or `suspended`.
    Status,
}

impl PortalUserField {
    /// Fields matched by the free-text search box unless configured otherwise.
    pub const DEFAULT_SEARCH: &'static [PortalUserField] = &[
        PortalUserField::Username,
        PortalUserField::FullName,
        PortalUserField::Email,
    ];
}

impl RecordField for PortalUserField {
    fn all() -> &'static [Self] {
        &[
            PortalUserField::Username,
            PortalUserField::FullName,
            PortalUserField::Email,
            PortalUserField::Role,
            PortalUserField::Status,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            PortalUserField::Username => "username",
            PortalUserField::FullName => "full_name",
            PortalUserField::Email => "email",
            PortalUserField::Role => "role",
            PortalUserField::Status => "status",
        }
    }
}

impl Record for PortalUser {
    type Id = UserId;
    type Field = PortalUserField;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn field(&self, field: PortalUserField) -> Option<String> {
        let value = match field {
            PortalUserField::Username => self.username.clone(),
            PortalUserField::FullName => self.full_name.clone(),
            PortalUserField::Email => self.email.clone(),
            PortalUserField::Role => match self.role {
                UserRole::Admin => "admin".to_string(),
                UserRole::Staff => "staff".to_string(),
            },
            PortalUserField::Status => match self.status {
                AccountStatus::Active => "active".to_string(),
                AccountStatus::Suspended => "suspended".to_string(),
            },
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_field_is_lowercase() {
        let user = PortalUser {
            id: UserId::new("u-1").unwrap(),
            username: "jdoe".to_string(),
            full_name: "John Doe".to_string(),
            email: "jdoe@example.org".to_string(),
            role: UserRole::Admin,
            status: AccountStatus::Suspended,
        };
        assert_eq!(user.field(PortalUserField::Role).as_deref(), Some("admin"));
        assert_eq!(user.field(PortalUserField::Status).as_deref(), Some("suspended"));
    }

    #[test]
    fn user_json_rejects_empty_id() {
        let json = r#"{"id":"","username":"x","full_name":"X","email":"x@y","role":"staff","status":"active"}"#;
        let result: Result<PortalUser, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
