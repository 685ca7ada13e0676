use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;
use tinted_shop_core::catalog::{DEFAULT_API_BASE, DEFAULT_PRODUCT_LIMIT};
use tinted_shop_core::{SwitchTimings, ThemeRegistry, app_dirs};
use tinted_shop_tui::DEFAULT_SIDEBAR_THEME;

use super::resolved::ResolvedConfig;
use crate::cli::CliArgs;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SUBMIT_DELAY_MS: u64 = 2_000;

/// Mirror of the configuration file before CLI overrides and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	theme: ThemeSection,
	catalog: CatalogSection,
	contact: ContactSection,
	storage: StorageSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ThemeSection {
	initial: Option<String>,
	sidebar: Option<String>,
	switch_delay_ms: Option<u64>,
	settle_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogSection {
	api_base: Option<String>,
	limit: Option<usize>,
	timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ContactSection {
	submit_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StorageSection {
	path: Option<PathBuf>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(theme) = cli.theme.clone() {
			self.theme.initial = Some(theme);
		}
		if let Some(limit) = cli.limit {
			self.catalog.limit = Some(limit);
		}
		if let Some(base) = cli.api_base.clone() {
			self.catalog.api_base = Some(base);
		}
	}

	/// Validate the values and fill in defaults.
	pub(super) fn resolve(self, registry: &ThemeRegistry) -> Result<ResolvedConfig> {
		let initial_theme = trimmed(self.theme.initial);
		if let Some(id) = &initial_theme {
			ensure!(
				registry.contains(id),
				"unknown theme '{id}' (available: {})",
				registry.ids().collect::<Vec<_>>().join(", ")
			);
		}

		let sidebar_theme =
			trimmed(self.theme.sidebar).unwrap_or_else(|| DEFAULT_SIDEBAR_THEME.to_string());
		ensure!(
			registry.contains(&sidebar_theme),
			"sidebar theme '{sidebar_theme}' is not a known theme"
		);

		let defaults = SwitchTimings::default();
		let timings = SwitchTimings {
			switch_delay: self
				.theme
				.switch_delay_ms
				.map_or(defaults.switch_delay, Duration::from_millis),
			settle_delay: self
				.theme
				.settle_delay_ms
				.map_or(defaults.settle_delay, Duration::from_millis),
		};

		let product_limit = self.catalog.limit.unwrap_or(DEFAULT_PRODUCT_LIMIT);
		ensure!(product_limit >= 1, "catalog limit must be at least 1");

		let api_base = trimmed(self.catalog.api_base)
			.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
		ensure!(
			api_base.starts_with("http://") || api_base.starts_with("https://"),
			"catalog api_base must be an http(s) URL, got '{api_base}'"
		);

		let timeout_secs = self.catalog.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
		ensure!(timeout_secs > 0, "catalog timeout_secs must be positive");

		let storage_path = match self.storage.path {
			Some(path) => path,
			None => app_dirs::default_storage_path()?,
		};

		Ok(ResolvedConfig {
			initial_theme,
			sidebar_theme,
			timings,
			api_base,
			product_limit,
			request_timeout: Duration::from_secs(timeout_secs),
			submit_delay: Duration::from_millis(
				self.contact.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS),
			),
			storage_path,
		})
	}
}

fn trimmed(value: Option<String>) -> Option<String> {
	value
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;
	use tempfile::tempdir;

	use super::*;
	use crate::settings::load;

	fn registry() -> ThemeRegistry {
		ThemeRegistry::builtin()
	}

	#[test]
	fn file_values_are_resolved() {
		let dir = tempdir().unwrap();
		let config = dir.path().join("shop.toml");
		let storage = dir.path().join("prefs.json");
		fs::write(
			&config,
			format!(
				r#"
[theme]
initial = "theme3"
switch_delay_ms = 0

[catalog]
limit = 12
api_base = "http://localhost:8080/"

[storage]
path = "{}"
"#,
				storage.display().to_string().replace('\\', "\\\\")
			),
		)
		.unwrap();

		let cli = CliArgs::try_parse_from([
			"tinted-shop",
			"--no-config",
			"--config",
			config.to_str().unwrap(),
		])
		.unwrap();
		let resolved = load(&cli, &registry()).unwrap();

		assert_eq!(resolved.initial_theme.as_deref(), Some("theme3"));
		assert_eq!(resolved.sidebar_theme, "theme2");
		assert_eq!(resolved.timings.switch_delay, Duration::ZERO);
		assert_eq!(resolved.timings.settle_delay, Duration::from_millis(150));
		assert_eq!(resolved.product_limit, 12);
		assert_eq!(resolved.api_base, "http://localhost:8080/");
		assert_eq!(resolved.storage_path, storage);
	}

	#[test]
	fn cli_flags_override_files() {
		let dir = tempdir().unwrap();
		let config = dir.path().join("shop.toml");
		fs::write(&config, "[catalog]\nlimit = 12\n[storage]\npath = \"x.json\"\n").unwrap();

		let cli = CliArgs::try_parse_from([
			"tinted-shop",
			"-n",
			"-c",
			config.to_str().unwrap(),
			"--limit",
			"3",
			"--theme",
			"theme2",
		])
		.unwrap();
		let resolved = load(&cli, &registry()).unwrap();
		assert_eq!(resolved.product_limit, 3);
		assert_eq!(resolved.initial_theme.as_deref(), Some("theme2"));
	}

	#[test]
	fn invalid_values_are_rejected() {
		let mut raw = RawConfig::default();
		raw.catalog.limit = Some(0);
		raw.storage.path = Some("x.json".into());
		assert!(raw.resolve(&registry()).is_err());

		let mut raw = RawConfig::default();
		raw.theme.sidebar = Some("theme9".into());
		raw.storage.path = Some("x.json".into());
		let err = raw.resolve(&registry()).unwrap_err();
		assert!(err.to_string().contains("theme9"));

		let mut raw = RawConfig::default();
		raw.theme.initial = Some("nope".into());
		raw.storage.path = Some("x.json".into());
		assert!(raw.resolve(&registry()).is_err());
	}

	#[test]
	fn missing_explicit_file_is_an_error() {
		let cli = CliArgs::try_parse_from([
			"tinted-shop",
			"--no-config",
			"--config",
			"/definitely/not/here.toml",
		])
		.unwrap();
		assert!(load(&cli, &registry()).is_err());
	}
}
