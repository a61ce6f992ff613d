//! File logging. The TUI owns the terminal, so nothing is logged to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

const LOG_FILE: &str = "dream-mate.log";

pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("dream-mate")
        .join(LOG_FILE)
}

/// Install `env_logger` writing to `path` (or the default file), truncated.
///
/// `RUST_LOG` overrides the `info` default.
pub fn init(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.unwrap_or_else(default_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(path)
}
