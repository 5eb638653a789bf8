// File: src/logging.rs
// The TUI owns stderr while running, so log records go to a file.
use crate::paths::AppPaths;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Installs the global logger. Level comes from `RUST_LOG`, default `info`.
pub fn init() -> Result<PathBuf> {
    let path = AppPaths::log_file()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Logger already initialised")?;

    log::info!("seismomap {} starting", env!("CARGO_PKG_VERSION"));
    Ok(path)
}
