//! Confirmed destructive actions against the record backend.
//!
//! Deletion is a state machine:
//!
//! ```text
//! Idle ──request──▶ Confirming ──confirm──▶ InFlight ──resolve──▶ Succeeded
//!   ▲                   │                                   ├──▶ PartiallySucceeded
//!   └──────cancel───────┘                                   └──▶ Failed
//! ```
//!
//! Nothing reaches the backend without passing through `Confirming`. The
//! terminal states accept a new request directly. Side effects on selection
//! and pagination are applied by the owning table; this module only decides
//! what happened.

use crate::model::error::{BackendError, BulkActionError};
use crate::model::Record;
use crate::source::{DeleteReport, RecordBackend};
use tracing::{info, warn};

// ===== DeletionRequest =====

/// What the user asked to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionRequest<Id> {
    /// A single record, usually from a row action.
    One(Id),
    /// A batch, usually the current selection.
    Many(Vec<Id>),
}

impl<Id> DeletionRequest<Id> {
    /// Ids covered by the request.
    pub fn ids(&self) -> &[Id] {
        match self {
            DeletionRequest::One(id) => std::slice::from_ref(id),
            DeletionRequest::Many(ids) => ids,
        }
    }

    /// Number of ids covered.
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// True for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

// ===== BulkActionState =====

/// Where a deletion stands.
///
/// `Idle -> Confirming -> InFlight -> Succeeded | PartiallySucceeded | Failed`.
/// Cancelling returns to `Idle`; every terminal state accepts a new request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkActionState<Id> {
    /// No deletion pending.
    Idle,
    /// Waiting for the user to confirm or cancel.
    Confirming(DeletionRequest<Id>),
    /// Dispatched to the backend.
    InFlight(DeletionRequest<Id>),
    /// The backend deleted every requested id.
    Succeeded {
        /// Ids removed.
        deleted: Vec<Id>,
    },
    /// The backend deleted some ids and refused others.
    PartiallySucceeded {
        /// Ids removed.
        deleted: Vec<Id>,
        /// Ids refused, with the backend's reason.
        rejected: Vec<(Id, String)>,
    },
    /// Nothing was deleted.
    Failed {
        /// The request, kept so it can be retried.
        request: DeletionRequest<Id>,
        /// Text for the user.
        message: String,
    },
}

// ===== BulkActionCoordinator =====

/// Drives single and bulk deletions through confirmation and dispatch.
#[derive(Debug, Clone)]
pub struct BulkActionCoordinator<Id> {
    state: BulkActionState<Id>,
}

impl<Id> Default for BulkActionCoordinator<Id> {
    fn default() -> Self {
        Self {
            state: BulkActionState::Idle,
        }
    }
}

impl<Id: Clone + std::fmt::Display> BulkActionCoordinator<Id> {
    /// Coordinator in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &BulkActionState<Id> {
        &self.state
    }

    /// The request awaiting confirmation, if any (drives the confirm dialog).
    pub fn pending(&self) -> Option<&DeletionRequest<Id>> {
        match &self.state {
            BulkActionState::Confirming(request) => Some(request),
            _ => None,
        }
    }

    /// True while a request awaits confirmation or is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            BulkActionState::Confirming(_) | BulkActionState::InFlight(_)
        )
    }

    /// Ask to delete a single record. Moves to `Confirming`.
    pub fn request_delete_one(&mut self, id: Id) -> Result<(), BulkActionError> {
        self.request(DeletionRequest::One(id))
    }

    /// Ask to delete a batch of records. Moves to `Confirming`.
    ///
    /// # Errors
    ///
    /// [`BulkActionError::NothingSelected`] for an empty batch.
    pub fn request_delete_many(&mut self, ids: Vec<Id>) -> Result<(), BulkActionError> {
        if ids.is_empty() {
            return Err(BulkActionError::NothingSelected);
        }
        self.request(DeletionRequest::Many(ids))
    }

    fn request(&mut self, request: DeletionRequest<Id>) -> Result<(), BulkActionError> {
        if self.is_busy() {
            return Err(BulkActionError::Busy);
        }
        self.state = BulkActionState::Confirming(request);
        Ok(())
    }

    /// Abandon the pending request. Moves back to `Idle`.
    pub fn cancel(&mut self) -> Result<DeletionRequest<Id>, BulkActionError> {
        match std::mem::replace(&mut self.state, BulkActionState::Idle) {
            BulkActionState::Confirming(request) => Ok(request),
            other => {
                self.state = other;
                Err(BulkActionError::NotConfirming)
            }
        }
    }

    /// The user confirmed. Moves to `InFlight` and returns what to dispatch.
    pub fn confirm(&mut self) -> Result<DeletionRequest<Id>, BulkActionError> {
        match &self.state {
            BulkActionState::Confirming(request) => {
                let request = request.clone();
                self.state = BulkActionState::InFlight(request.clone());
                Ok(request)
            }
            _ => Err(BulkActionError::NotConfirming),
        }
    }

    /// Record the backend's answer for the in-flight request.
    ///
    /// Returns the report on (partial) success. On failure the state moves
    /// to `Failed` and the backend error is returned.
    pub fn resolve(
        &mut self,
        outcome: Result<DeleteReport<Id>, BackendError>,
    ) -> Result<DeleteReport<Id>, BulkActionError> {
        let request = match std::mem::replace(&mut self.state, BulkActionState::Idle) {
            BulkActionState::InFlight(request) => request,
            other => {
                self.state = other;
                return Err(BulkActionError::NotConfirming);
            }
        };

        match outcome {
            Ok(report) if report.is_complete() => {
                info!(deleted = report.deleted.len(), "deletion succeeded");
                self.state = BulkActionState::Succeeded {
                    deleted: report.deleted.clone(),
                };
                Ok(report)
            }
            Ok(report) => {
                warn!(
                    deleted = report.deleted.len(),
                    rejected = report.rejected.len(),
                    "deletion partially succeeded"
                );
                self.state = BulkActionState::PartiallySucceeded {
                    deleted: report.deleted.clone(),
                    rejected: report.rejected.clone(),
                };
                Ok(report)
            }
            Err(err) => {
                let message = err.user_message();
                warn!(requested = request.len(), error = %err, "deletion failed");
                self.state = BulkActionState::Failed { request, message };
                Err(BulkActionError::Backend(err))
            }
        }
    }

    /// Confirm and dispatch the pending request to `backend` in one step.
    ///
    /// A single deletion goes to `delete_record`; a batch goes to
    /// `delete_records` as one request.
    pub fn execute<R, B>(&mut self, backend: &mut B) -> Result<DeleteReport<Id>, BulkActionError>
    where
        R: Record<Id = Id>,
        B: RecordBackend<R> + ?Sized,
    {
        let request = self.confirm()?;
        info!(count = request.len(), "dispatching deletion");

        let outcome = match &request {
            DeletionRequest::One(id) => backend
                .delete_record(id)
                .map(|()| DeleteReport::all(vec![id.clone()])),
            DeletionRequest::Many(ids) => backend.delete_records(ids),
        };

        self.resolve(outcome)
    }

    /// Return to `Idle` after the view acknowledged a terminal state.
    pub fn acknowledge(&mut self) {
        if !self.is_busy() {
            self.state = BulkActionState::Idle;
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "bulk_action_tests.rs"]
mod tests;
