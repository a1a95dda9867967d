//! Record engine state (pure).
//!
//! All state transitions are synchronous and testable without a terminal.

pub mod bulk_action;
pub mod fetch;
pub mod filter;
pub mod notices;
pub mod pagination;
pub mod selection;
pub mod table;

// Re-export for convenience
pub use bulk_action::{BulkActionCoordinator, BulkActionState, DeletionRequest};
pub use fetch::{FetchResolution, FetchState, FetchTicket, FetchTracker};
pub use filter::{FilterCriteria, FilterEngine};
pub use notices::{Notice, NoticeLevel, NoticeLog};
pub use pagination::{PageSize, PageToken, PageWindow};
pub use selection::SelectionTracker;
pub use table::{RecordTable, TableSettings};
