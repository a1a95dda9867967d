//! JSON-file record backend.
//!
//! The file holds one JSON array of records. Every request re-reads the file
//! so edits made by other tools are picked up on the next refresh.

use super::{DeleteReport, RecordBackend};
use crate::model::error::BackendError;
use crate::model::Record;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Records persisted as a JSON array at `path`.
///
/// A missing file is an empty store. Deletes are atomic: the whole batch is
/// rejected if any id is unknown, and the file is replaced via a temporary
/// sibling so a failed write never truncates it.
#[derive(Debug)]
pub struct JsonFileBackend<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R> JsonFileBackend<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    /// Backend over the JSON array at `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<R>, BackendError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn store(&self, records: &[R]) -> Result<(), BackendError> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Replace the stored records wholesale.
    pub fn save_all(&self, records: &[R]) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.store(records)?;
        info!(path = %self.path.display(), count = records.len(), "saved records");
        Ok(())
    }
}

impl<R> RecordBackend<R> for JsonFileBackend<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    fn list_records(&mut self) -> Result<Vec<R>, BackendError> {
        let records = self.load()?;
        debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    fn delete_record(&mut self, id: &R::Id) -> Result<(), BackendError> {
        self.delete_records(std::slice::from_ref(id)).map(|_| ())
    }

    fn delete_records(&mut self, ids: &[R::Id]) -> Result<DeleteReport<R::Id>, BackendError> {
        let mut records = self.load()?;
        let present: HashSet<&R::Id> = records.iter().map(|r| r.id()).collect();

        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !present.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BackendError::Rejected {
                message: format!("Unknown record ids: {}", missing.join(", ")),
            });
        }

        let mut doomed: HashSet<&R::Id> = HashSet::new();
        let unique: Vec<R::Id> = ids
            .iter()
            .filter(|id| doomed.insert(*id))
            .cloned()
            .collect();
        records.retain(|r| !doomed.contains(r.id()));
        self.store(&records)?;

        Ok(DeleteReport::all(unique))
    }
}
