//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod portal_user;
pub mod record;
pub mod staff_form;

// Re-export for convenience
pub use error::{BackendError, BulkActionError, ExportError, PortalError};
pub use identifiers::{InvalidRecordId, StaffFormId, UserId};
pub use portal_user::{AccountStatus, PortalUser, PortalUserField, UserRole};
pub use record::{ids_of, Record, RecordField};
pub use staff_form::{FormStatus, StaffForm, StaffFormField};
