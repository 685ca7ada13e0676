use std::path::PathBuf;
use std::time::Duration;

use tinted_shop_core::SwitchTimings;
use tinted_shop_tui::ShellOptions;

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	/// Theme to switch to once the store has restored the persisted one.
	pub initial_theme: Option<String>,
	/// Theme whose layout includes the sidebar.
	pub sidebar_theme: String,
	/// Store delays.
	pub timings: SwitchTimings,
	/// Base URL of the product API.
	pub api_base: String,
	/// Products requested by the home view.
	pub product_limit: usize,
	/// Per-request timeout.
	pub request_timeout: Duration,
	/// Simulated contact submission delay.
	pub submit_delay: Duration,
	/// Key-value store file.
	pub storage_path: PathBuf,
}

impl ResolvedConfig {
	/// Options handed to the terminal shell.
	#[must_use]
	pub fn shell_options(&self) -> ShellOptions {
		ShellOptions {
			sidebar_theme: self.sidebar_theme.clone(),
			product_limit: self.product_limit,
			submit_delay: self.submit_delay,
			..ShellOptions::default()
		}
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!(
			"  Initial theme: {}",
			self.initial_theme.as_deref().unwrap_or("(persisted)")
		);
		println!("  Sidebar theme: {}", self.sidebar_theme);
		println!("  Switch delay: {} ms", self.timings.switch_delay.as_millis());
		println!("  Settle delay: {} ms", self.timings.settle_delay.as_millis());
		println!("  API base: {}", self.api_base);
		println!("  Product limit: {}", self.product_limit);
		println!("  Request timeout: {} s", self.request_timeout.as_secs());
		println!("  Submit delay: {} ms", self.submit_delay.as_millis());
		println!("  Storage: {}", self.storage_path.display());
	}
}
