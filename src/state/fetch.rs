//! Superset fetch lifecycle.
//!
//! Fetches are single-shot requests. Each request gets a ticket; only the
//! response for the most recently issued ticket is applied, so a slow,
//! superseded response can never overwrite a newer one. There is no
//! cancellation: stale responses are simply dropped on arrival.

use crate::model::error::BackendError;
use tracing::debug;

/// Identifies one fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

/// Visible state of the record list's data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing requested yet.
    Idle,
    /// A request is outstanding.
    Loading,
    /// The superset reflects the latest response.
    Loaded,
    /// The latest request failed. Blocking; the view offers a retry.
    Failed {
        /// Human-readable description of the failure.
        message: String,
    },
}

/// What happened to a completed response.
#[derive(Debug)]
pub enum FetchResolution<T> {
    /// Latest response, successful: apply the payload.
    Applied(T),
    /// Latest response, failed: state moved to [`FetchState::Failed`].
    Failed(BackendError),
    /// A newer request was issued since; the response was ignored.
    Stale,
}

/// Tracks outstanding fetches and the resulting [`FetchState`].
#[derive(Debug, Clone)]
pub struct FetchTracker {
    issued: u64,
    state: FetchState,
}

impl Default for FetchTracker {
    fn default() -> Self {
        Self {
            issued: 0,
            state: FetchState::Idle,
        }
    }
}

impl FetchTracker {
    /// Tracker with no fetch issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding any outstanding one.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state = FetchState::Loading;
        FetchTicket(self.issued)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Resolve a response against the ticket it was issued for.
    pub fn complete<T>(
        &mut self,
        ticket: FetchTicket,
        result: Result<T, BackendError>,
    ) -> FetchResolution<T> {
        if !self.is_latest(ticket) {
            debug!(ticket = ticket.0, latest = self.issued, "dropping stale fetch response");
            return FetchResolution::Stale;
        }

        match result {
            Ok(payload) => {
                self.state = FetchState::Loaded;
                FetchResolution::Applied(payload)
            }
            Err(err) => {
                self.state = FetchState::Failed {
                    message: err.user_message(),
                };
                FetchResolution::Failed(err)
            }
        }
    }

    /// Current fetch state.
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// True between `begin` and the latest ticket's completion.
    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }
}
