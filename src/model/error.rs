//! Error types for the record engine.
//!
//! Errors are `thiserror` enums that compose via `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`PortalError`] - top-level error for embedding applications
//!   - [`BackendError`] - the record backend failed or refused a request
//!   - [`BulkActionError`] - a delete was requested in the wrong state, or failed
//!   - [`ExportError`] - the export file could not be produced
//!   - `ConfigError` / `LoggingError` - startup failures
//!
//! # Recovery Strategy
//!
//! Nothing in the engine retries on its own. Fetch failures put the table in
//! a blocking error state with a retry action, mutation failures become
//! transient notices, and a retry is always the user invoking the same
//! operation again. Stale selections after a refresh are pruned silently and
//! never reach this module.

use crate::config::loader::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Message shown when the backend gave no usable explanation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Top-level error encompassing every failure mode of the crate.
#[derive(Debug, Error)]
pub enum PortalError {
    /// A backend call failed.
    #[error("Backend request failed: {0}")]
    Backend(#[from] BackendError),

    /// A deletion was requested or confirmed out of order.
    #[error("Bulk action failed: {0}")]
    BulkAction(#[from] BulkActionError),

    /// An export could not be produced.
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),
}

/// Errors reported by a [`RecordBackend`](crate::source::RecordBackend).
///
/// The backend is an external collaborator; these variants describe how it
/// failed, not why. Only [`BackendError::Rejected`] carries text that is safe
/// and meaningful to show to an administrator.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered and refused the request with a message.
    ///
    /// **Recovery**: surface `message` verbatim in a notice.
    #[error("Request rejected: {message}")]
    Rejected {
        /// Human-readable reason supplied by the backend response.
        message: String,
    },

    /// The backend could not be reached or returned no usable response.
    #[error("Backend unavailable")]
    Unavailable,

    /// The backend does not implement an optional operation.
    #[error("Operation not supported by backend: {operation}")]
    Unsupported {
        /// Name of the collaborator operation, e.g. `search_by_field`.
        operation: &'static str,
    },

    /// I/O failure in a file-backed backend.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored records could not be (de)serialized.
    #[error("Invalid record data: {0}")]
    Json(#[from] serde_json::Error),
}

impl BackendError {
    /// Message suitable for display to the user.
    ///
    /// Uses the backend-supplied message when there is one, otherwise a
    /// generic message.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffdb::model::error::{BackendError, GENERIC_FAILURE_MESSAGE};
    ///
    /// let err = BackendError::Rejected { message: "Form is locked".to_string() };
    /// assert_eq!(err.user_message(), "Form is locked");
    /// assert_eq!(BackendError::Unavailable.user_message(), GENERIC_FAILURE_MESSAGE);
    /// ```
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Rejected { message } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Errors from the bulk action coordinator.
#[derive(Debug, Error)]
pub enum BulkActionError {
    /// `confirm` or `cancel` was called with no deletion awaiting confirmation.
    #[error("No deletion is awaiting confirmation")]
    NotConfirming,

    /// A bulk delete was requested with an empty id list.
    #[error("No records selected")]
    NothingSelected,

    /// Another deletion is already awaiting confirmation or in flight.
    #[error("Another deletion is already in progress")]
    Busy,

    /// The backend failed the deletion. State was left as it was.
    #[error("{}", .0.user_message())]
    Backend(#[from] BackendError),
}

/// Errors producing an export file.
///
/// An empty view is not an error; it is reported as a refusal by
/// [`ExportOutcome`](crate::export::ExportOutcome).
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The sink could not store the file.
    #[error("Failed to deliver export file: {0}")]
    Sink(#[from] std::io::Error),
}
