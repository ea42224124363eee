//! File logging.
//!
//! The terminal is owned by the UI, so logs go to a daily-rolling file under
//! the platform data directory. Filter with `VG_LOG` (same syntax as
//! `RUST_LOG`), defaulting to `info`.

use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::project_dirs;

pub const LOG_ENV: &str = "VG_LOG";

pub fn log_dir() -> Option<PathBuf> {
  project_dirs().map(|d| d.data_local_dir().join("logs"))
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process so buffered lines are flushed on exit.
pub fn init() -> Result<Option<WorkerGuard>> {
  let Some(dir) = log_dir() else { return Ok(None) };
  std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create log dir {}", dir.display()))?;

  let appender = tracing_appender::rolling::daily(&dir, "vg.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

  fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .with_target(false)
    .try_init()
    .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;
  Ok(Some(guard))
}
