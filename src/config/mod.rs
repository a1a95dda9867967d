//! Configuration module.
//!
//! Settings come from a TOML file (explicit path, `STAFFDB_CONFIG`, or the
//! platform config directory) merged over defaults, then environment
//! overrides.

pub mod loader;

pub use loader::{
    load_config_with_precedence, merge_config, resolve, ConfigError, ConfigFile, ResolvedConfig,
    SurfaceConfig,
};
