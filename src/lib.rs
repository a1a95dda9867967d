//! Staff database portal record engine (staffdb)
//!
//! The client-side tabular engine behind the portal's staff-forms and
//! user-management lists: search and field filters over a fetched superset,
//! pagination with a compact page window, cross-page multi-selection,
//! confirmed single and bulk deletion, and CSV export of the filtered view.
//!
//! The engine (`model`, `state`, `export`) is pure and synchronous. Backends,
//! download sinks, configuration, logging and the terminal widgets form the
//! impure shell around it.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod surfaces;
pub mod view;

#[cfg(test)]
mod test_harness;
