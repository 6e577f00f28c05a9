use {
  super::*,
  std::{fs::OpenOptions, path::Path, sync::Mutex},
  tracing_subscriber::EnvFilter,
};

/// The terminal belongs to the UI, so logs are only emitted when a file is
/// configured.
pub(crate) fn initialize(path: Option<&Path>) -> Result {
  let Some(path) = path else {
    return Ok(());
  };

  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("could not open log file `{}`", path.display()))?;

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .try_init()
    .map_err(|error| anyhow::anyhow!(error))
    .context("could not install log subscriber")
}
