//! Tracing subscriber setup.
//!
//! The selector owns the terminal while it runs, so logs never go to
//! stdout or stderr. They are written to a file, and only when asked for:
//! either `--log-file` or the `GRILL_LOG` filter variable.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Filter directives, e.g. `GRILL_LOG=debug` or `GRILL_LOG=grill::menu=debug`.
pub const LOG_ENV: &str = "GRILL_LOG";

const DEFAULT_FILTER: &str = "info";

/// Where logs go when `GRILL_LOG` is set without `--log-file`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("grill").join("grill.log"))
}

/// Pick the log file: the explicit path first, then the default location
/// when the filter variable is set. None disables logging.
pub fn resolve_log_path(explicit: Option<&Path>, env_filter_set: bool) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if env_filter_set => default_log_path(),
        None => None,
    }
}

/// Install the global subscriber. Returns the log path when one was set up.
///
/// Safe to call more than once; only the first subscriber is kept.
pub fn init_logging(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let env_filter_set = std::env::var_os(LOG_ENV).is_some();
    let Some(path) = resolve_log_path(explicit, env_filter_set) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    tracing::debug!(path = %path.display(), "logging initialized");
    Ok(Some(path))
}
