//! Log file setup. A full-screen UI owns the terminal, so logs go to a file
//! in the data directory.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tinted_shop_core::app_dirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "TINTED_SHOP_LOG";

/// Install the global subscriber. Returns the path of the log file.
pub fn initialize() -> Result<PathBuf> {
	let dir = app_dirs::get_data_dir()?;
	fs::create_dir_all(&dir)
		.with_context(|| format!("failed to create data directory {}", dir.display()))?;
	let path = dir.join(app_dirs::LOG_FILE);
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.try_init()
		.map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

	Ok(path)
}
