//! Log setup. The terminal UI owns the screen, so log lines go to a file
//! instead of stderr.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to `log_file`, filtered by `RUST_LOG` (default
/// `info`). Keep the returned guard alive until exit so buffered lines are
/// flushed.
pub fn init(log_file: &Path) -> Result<WorkerGuard> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow!("log file path has no file name: {}", log_file.display()))?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).context("failed to create log directory")?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

    Ok(guard)
}
