use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;

/// Sends `tracing` output to `log_file`.
///
/// The terminal belongs to the UI, so without a log file nothing is logged.
pub fn init(log_file: Option<&Path>, level: LevelFilter) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_max_level(level)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to install log subscriber")?;
    tracing::info!(level = %level, "logging started");
    Ok(())
}
