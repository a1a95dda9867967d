//! In-process record backend.

use super::{DeleteReport, RecordBackend};
use crate::model::error::BackendError;
use crate::model::Record;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Record store held in memory.
///
/// Atomic by default: a bulk delete naming an unknown or locked id fails as a
/// whole. [`MemoryBackend::partial`] builds a store that deletes what it can
/// and reports the rest.
#[derive(Debug, Clone)]
pub struct MemoryBackend<R: Record> {
    records: Vec<R>,
    lookup_field: Option<R::Field>,
    locked: BTreeMap<R::Id, String>,
    atomic: bool,
    offline: bool,
}

impl<R: Record> MemoryBackend<R> {
    /// Atomic backend holding `records`.
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            lookup_field: None,
            locked: BTreeMap::new(),
            atomic: true,
            offline: false,
        }
    }

    /// A store whose bulk deletes may partially succeed.
    pub fn partial(records: Vec<R>) -> Self {
        Self {
            atomic: false,
            ..Self::new(records)
        }
    }

    /// Enable [`search_by_field`](RecordBackend::search_by_field) on `field`
    /// (case-insensitive equality).
    pub fn with_lookup_field(mut self, field: R::Field) -> Self {
        self.lookup_field = Some(field);
        self
    }

    /// Refuse deletion of `id` with `reason`.
    pub fn lock(&mut self, id: R::Id, reason: impl Into<String>) {
        self.locked.insert(id, reason.into());
    }

    /// While offline every request fails with [`BackendError::Unavailable`].
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Records currently stored.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Add a record, as another session would.
    pub fn insert(&mut self, record: R) {
        self.records.push(record);
    }

    fn ensure_online(&self) -> Result<(), BackendError> {
        if self.offline {
            Err(BackendError::Unavailable)
        } else {
            Ok(())
        }
    }

    /// Why `id` cannot be deleted, if it cannot.
    fn refusal(&self, id: &R::Id) -> Option<String> {
        if let Some(reason) = self.locked.get(id) {
            return Some(reason.clone());
        }
        if !self.records.iter().any(|r| r.id() == id) {
            return Some(format!("Record {id} no longer exists"));
        }
        None
    }
}

impl<R: Record> RecordBackend<R> for MemoryBackend<R> {
    fn list_records(&mut self) -> Result<Vec<R>, BackendError> {
        self.ensure_online()?;
        Ok(self.records.clone())
    }

    fn delete_record(&mut self, id: &R::Id) -> Result<(), BackendError> {
        self.ensure_online()?;
        if let Some(message) = self.refusal(id) {
            return Err(BackendError::Rejected { message });
        }
        self.records.retain(|r| r.id() != id);
        debug!(%id, "memory backend deleted record");
        Ok(())
    }

    fn delete_records(&mut self, ids: &[R::Id]) -> Result<DeleteReport<R::Id>, BackendError> {
        self.ensure_online()?;

        let mut requested: HashSet<&R::Id> = HashSet::new();
        let mut deleted = Vec::new();
        let mut rejected = Vec::new();
        for id in ids.iter().filter(|id| requested.insert(*id)) {
            match self.refusal(id) {
                Some(reason) => rejected.push((id.clone(), reason)),
                None => deleted.push(id.clone()),
            }
        }

        if self.atomic && !rejected.is_empty() {
            let message = rejected
                .iter()
                .map(|(_, reason)| reason.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(BackendError::Rejected { message });
        }

        let doomed: HashSet<&R::Id> = deleted.iter().collect();
        self.records.retain(|r| !doomed.contains(r.id()));
        debug!(
            deleted = deleted.len(),
            rejected = rejected.len(),
            "memory backend bulk delete"
        );

        Ok(DeleteReport { deleted, rejected })
    }

    fn search_by_field(&mut self, value: &str) -> Result<Vec<R>, BackendError> {
        self.ensure_online()?;
        let Some(field) = self.lookup_field else {
            return Err(BackendError::Unsupported {
                operation: "search_by_field",
            });
        };

        let wanted = value.trim().to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.field(field).is_some_and(|v| v.to_lowercase() == wanted))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StaffFormField;
    use crate::test_harness::{form_id, forms};

    #[test]
    fn list_returns_all_records_in_order() {
        let mut backend = MemoryBackend::new(forms(3));
        let listed = backend.list_records().unwrap();
        let ids: Vec<_> = listed.iter().map(|f| f.id.to_string()).collect();
        assert_eq!(ids, vec!["form-001", "form-002", "form-003"]);
    }

    #[test]
    fn delete_record_removes_it() {
        let mut backend = MemoryBackend::new(forms(3));
        backend.delete_record(&form_id(2)).unwrap();
        assert_eq!(backend.records().len(), 2);
    }

    #[test]
    fn delete_unknown_record_is_rejected() {
        let mut backend = MemoryBackend::new(forms(1));
        let err = backend.delete_record(&form_id(9)).unwrap_err();
        assert!(matches!(err, BackendError::Rejected { .. }));
    }

    #[test]
    fn atomic_bulk_delete_fails_as_a_whole() {
        let mut backend = MemoryBackend::new(forms(5));
        backend.lock(form_id(3), "Form is under review");

        let err = backend
            .delete_records(&[form_id(1), form_id(3)])
            .unwrap_err();

        assert_eq!(err.user_message(), "Form is under review");
        assert_eq!(backend.records().len(), 5, "nothing deleted");
    }

    #[test]
    fn partial_bulk_delete_reports_rejections() {
        let mut backend = MemoryBackend::partial(forms(5));
        backend.lock(form_id(3), "Form is under review");

        let report = backend
            .delete_records(&[form_id(1), form_id(3)])
            .unwrap();

        assert_eq!(report.deleted, vec![form_id(1)]);
        assert_eq!(report.rejected.len(), 1);
        assert!(!report.is_complete());
        assert_eq!(backend.records().len(), 4);
    }

    #[test]
    fn repeated_ids_are_reported_once() {
        let mut backend = MemoryBackend::partial(forms(3));
        backend.lock(form_id(3), "Form is under review");

        let report = backend
            .delete_records(&[form_id(1), form_id(1), form_id(3), form_id(3)])
            .unwrap();

        assert_eq!(report.deleted, vec![form_id(1)]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(backend.records().len(), 2);
    }

    #[test]
    fn offline_backend_is_unavailable() {
        let mut backend = MemoryBackend::new(forms(2));
        backend.set_offline(true);
        assert!(matches!(
            backend.list_records(),
            Err(BackendError::Unavailable)
        ));
    }

    #[test]
    fn search_by_field_requires_lookup_field() {
        let mut backend = MemoryBackend::new(forms(4));
        assert!(matches!(
            backend.search_by_field("HR"),
            Err(BackendError::Unsupported { .. })
        ));

        let mut backend = backend.with_lookup_field(StaffFormField::Department);
        let found = backend.search_by_field("hr").unwrap();
        assert_eq!(found.len(), 2);
    }
}
