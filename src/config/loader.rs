//! Configuration file loading with precedence handling.

use crate::state::notices::DEFAULT_NOTICE_CAPACITY;
use crate::state::pagination::{default_page_size_options, PageSize};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "STAFFDB_CONFIG";

/// Environment variable overriding the default page size.
pub const PAGE_SIZE_ENV_VAR: &str = "STAFFDB_PAGE_SIZE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/staffdb/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Default rows per page for every surface.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Page sizes a surface lets the user switch between.
    #[serde(default)]
    pub page_size_options: Option<Vec<usize>>,

    /// Directory export files are written into.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Notice log capacity.
    #[serde(default)]
    pub notice_capacity: Option<usize>,

    /// Per-surface overrides.
    #[serde(default)]
    pub surfaces: Option<SurfacesSection>,
}

/// Per-surface configuration sections.
///
/// ```toml
/// [surfaces.forms]
/// dataset_name = "staff-forms"
/// page_size = 25
///
/// [surfaces.users]
/// dataset_name = "portal-users"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SurfacesSection {
    /// `[surfaces.forms]`: the staff-forms list.
    #[serde(default)]
    pub forms: Option<SurfaceSection>,

    /// `[surfaces.users]`: the user-management list.
    #[serde(default)]
    pub users: Option<SurfaceSection>,
}

/// Overrides for one list surface.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SurfaceSection {
    /// Base name of exported files.
    #[serde(default)]
    pub dataset_name: Option<String>,

    /// Rows per page on this surface.
    #[serde(default)]
    pub page_size: Option<usize>,
}

/// Resolved settings for one list surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Base name of exported files.
    pub dataset_name: String,
    /// Rows per page.
    pub page_size: PageSize,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file and env vars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows per page for surfaces without their own setting.
    pub page_size: PageSize,
    /// Page sizes every surface offers, ascending, never empty.
    pub page_size_options: Vec<PageSize>,
    /// Export destination directory.
    pub export_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Notice log capacity.
    pub notice_capacity: usize,
    /// Staff-forms surface.
    pub forms: SurfaceConfig,
    /// User-management surface.
    pub users: SurfaceConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            page_size_options: default_page_size_options(),
            export_dir: default_export_dir(),
            log_file_path: default_log_path(),
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
            forms: SurfaceConfig {
                dataset_name: "staff-forms".to_string(),
                page_size: PageSize::default(),
            },
            users: SurfaceConfig {
                dataset_name: "portal-users".to_string(),
                page_size: PageSize::default(),
            },
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/staffdb/staffdb.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("staffdb").join("staffdb.log")
    } else {
        PathBuf::from("staffdb.log")
    }
}

/// The platform download directory, or the current directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/staffdb/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("staffdb").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument
/// 2. `STAFFDB_CONFIG` environment variable
/// 3. Default path `~/.config/staffdb/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Turn a configured page size into a [`PageSize`], warning on zero.
fn page_size_or(value: Option<usize>, fallback: PageSize, key: &str) -> PageSize {
    match value {
        None => fallback,
        Some(n) => PageSize::new(n).unwrap_or_else(|| {
            warn!(key, value = n, fallback = %fallback, "page size must be positive; using fallback");
            fallback
        }),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `STAFFDB_PAGE_SIZE`: Override the default page size, and the page size
///   of every surface still using the default
///
/// Unparseable or zero values are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    let Ok(raw) = std::env::var(PAGE_SIZE_ENV_VAR) else {
        return config;
    };

    match raw.trim().parse::<usize>().ok().and_then(PageSize::new) {
        Some(size) => {
            for surface in [&mut config.forms, &mut config.users] {
                if surface.page_size == config.page_size {
                    surface.page_size = size;
                }
            }
            config.page_size = size;
        }
        None => warn!(value = %raw, "ignoring invalid {PAGE_SIZE_ENV_VAR}"),
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Surfaces inherit the top-level page size unless they set their own.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let page_size = page_size_or(config.page_size, defaults.page_size, "page_size");

    let mut page_size_options: Vec<PageSize> = config
        .page_size_options
        .map(|sizes| sizes.into_iter().filter_map(PageSize::new).collect())
        .unwrap_or_default();
    if page_size_options.is_empty() {
        page_size_options = defaults.page_size_options;
    }
    page_size_options.sort();
    page_size_options.dedup();

    let surfaces = config.surfaces.unwrap_or_default();
    let surface = |section: Option<SurfaceSection>, fallback: SurfaceConfig, key: &str| {
        let section = section.unwrap_or_default();
        SurfaceConfig {
            dataset_name: section
                .dataset_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(fallback.dataset_name),
            page_size: page_size_or(section.page_size, page_size, key),
        }
    };

    ResolvedConfig {
        page_size,
        page_size_options,
        export_dir: config.export_dir.unwrap_or(defaults.export_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        notice_capacity: config
            .notice_capacity
            .filter(|&n| n > 0)
            .unwrap_or(defaults.notice_capacity),
        forms: surface(surfaces.forms, defaults.forms, "surfaces.forms.page_size"),
        users: surface(surfaces.users, defaults.users, "surfaces.users.page_size"),
    }
}

/// Load, merge and apply env overrides in one step.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn resolve(config_path: Option<PathBuf>) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    Ok(apply_env_overrides(merge_config(file)))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
