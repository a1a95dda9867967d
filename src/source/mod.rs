//! Record backends.
//!
//! The engine never talks to a transport directly. It drives a
//! [`RecordBackend`], a single-shot request/response collaborator:
//! - [`MemoryBackend`] keeps records in process (tests, demos, caching layers)
//! - [`JsonFileBackend`] persists a JSON array of records on disk

use crate::model::error::BackendError;
use crate::model::Record;

pub mod file;
pub mod memory;

pub use file::JsonFileBackend;
pub use memory::MemoryBackend;

/// Result of a bulk deletion.
///
/// An atomic backend reports either every id in `deleted` or fails the whole
/// request with an `Err`. A backend that can partially succeed lists the ids
/// it refused in `rejected`, each with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport<Id> {
    /// Ids removed by the backend.
    pub deleted: Vec<Id>,
    /// Ids the backend refused, each with its reason.
    pub rejected: Vec<(Id, String)>,
}

impl<Id> DeleteReport<Id> {
    /// Report for a request where every id was deleted.
    pub fn all(deleted: Vec<Id>) -> Self {
        Self {
            deleted,
            rejected: Vec::new(),
        }
    }

    /// True when nothing was refused.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// The collaborator that supplies records and accepts deletions.
///
/// Calls are synchronous from the engine's point of view; an async transport
/// resolves the request before handing the result to the table.
pub trait RecordBackend<R: Record> {
    /// Fetch the full superset.
    fn list_records(&mut self) -> Result<Vec<R>, BackendError>;

    /// Delete a single record.
    fn delete_record(&mut self, id: &R::Id) -> Result<(), BackendError>;

    /// Delete a batch of records in one request.
    fn delete_records(&mut self, ids: &[R::Id]) -> Result<DeleteReport<R::Id>, BackendError>;

    /// Optional server-side narrowing of the superset by a field value.
    fn search_by_field(&mut self, value: &str) -> Result<Vec<R>, BackendError> {
        let _ = value;
        Err(BackendError::Unsupported {
            operation: "search_by_field",
        })
    }
}

impl<R: Record, B: RecordBackend<R> + ?Sized> RecordBackend<R> for &mut B {
    fn list_records(&mut self) -> Result<Vec<R>, BackendError> {
        (**self).list_records()
    }

    fn delete_record(&mut self, id: &R::Id) -> Result<(), BackendError> {
        (**self).delete_record(id)
    }

    fn delete_records(&mut self, ids: &[R::Id]) -> Result<DeleteReport<R::Id>, BackendError> {
        (**self).delete_records(ids)
    }

    fn search_by_field(&mut self, value: &str) -> Result<Vec<R>, BackendError> {
        (**self).search_by_field(value)
    }
}
