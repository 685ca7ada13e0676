//! Resolve configuration and data directories for `tinted-shop`.
//!
//! Environment overrides win; otherwise the platform locations provided by
//! the `directories` crate are used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "albo";
const APPLICATION: &str = "tinted-shop";

const CONFIG_DIR_ENV: &str = "TINTED_SHOP_CONFIG_DIR";
const DATA_DIR_ENV: &str = "TINTED_SHOP_DATA_DIR";

/// File name of the key-value store inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";

/// File name of the log inside the data directory.
pub const LOG_FILE: &str = "tinted-shop.log";

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("unable to determine project directories for tinted-shop"))
}

/// An empty value counts as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	let value = env::var_os(name)?;
	if value.is_empty() {
		None
	} else {
		Some(PathBuf::from(value))
	}
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Directory holding persisted preferences and the log file.
pub fn get_data_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Default location of the preference store.
pub fn default_storage_path() -> Result<PathBuf> {
	Ok(get_data_dir()?.join(STORAGE_FILE))
}
