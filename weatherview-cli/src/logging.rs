use std::{fs, path::PathBuf, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Where log lines go. The interactive view owns the terminal, so it logs to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

const DEFAULT_FILTER: &str = "warn";

/// Build the filter: explicit level, else `RUST_LOG`, else `warn`.
fn env_filter(level: Option<&str>) -> anyhow::Result<EnvFilter> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("Invalid log filter '{level}'"))
        }
        None => {
            Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        }
    }
}

pub fn init(level: Option<&str>, target: &LogTarget) -> anyhow::Result<()> {
    let filter = env_filter(level)?;

    match target {
        LogTarget::Stderr => {
            let subscriber = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true));
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to install log subscriber")?;
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer().with_writer(Mutex::new(file)).with_target(true).with_ansi(false),
            );
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to install log subscriber")?;
        }
    }

    Ok(())
}
