mod cli;
mod logging;
mod settings;

use std::sync::Arc;

use anyhow::{Context, Result};
use cli::parse_cli;
use settings::ResolvedConfig;
use tinted_shop_core::storage::load_theme_id;
use tinted_shop_core::{
	FileStorage, HttpCatalog, KeyValueStorage, StyleDocument, ThemeConfig, ThemeRegistry,
	ThemeStore, theme::project,
};
use tinted_shop_tui::{App, SimulatedSubmitter};
use tracing::{info, warn};

fn main() -> Result<()> {
	let cli = parse_cli();
	let registry = Arc::new(ThemeRegistry::builtin());

	if cli.list_themes {
		list_themes(&registry);
		return Ok(());
	}

	let resolved = settings::load(&cli, &registry)?;

	if cli.print_config {
		resolved.print_summary();
		return Ok(());
	}

	if let Some(target) = &cli.print_css {
		init_logging();
		return print_css(&registry, target.as_deref(), &resolved);
	}

	run_shop(registry, resolved)
}

fn list_themes(registry: &ThemeRegistry) {
	for theme in registry.iter() {
		let marker = if theme.id == registry.default_id() {
			" (default)"
		} else {
			""
		};
		println!("{}\t{}{marker}", theme.id, theme.name);
	}
}

/// Print the style variables for `id`, or for the persisted theme.
fn print_css(registry: &ThemeRegistry, id: Option<&str>, settings: &ResolvedConfig) -> Result<()> {
	let storage = FileStorage::new(settings.storage_path.clone());
	let theme = css_theme(registry, id, &storage)?;

	let mut document = StyleDocument::new();
	project(theme, &mut document);
	print!("{}", document.to_css());
	Ok(())
}

/// Theme to print: an explicit `id` must exist, a persisted one falls back to
/// the default.
fn css_theme<'a>(
	registry: &'a ThemeRegistry,
	id: Option<&str>,
	storage: &dyn KeyValueStorage,
) -> Result<&'a ThemeConfig> {
	if let Some(id) = id {
		return registry
			.get(id)
			.with_context(|| format!("unknown theme '{id}'"));
	}

	match load_theme_id(storage) {
		Ok(Some(id)) => Ok(registry.resolve(&id)),
		Ok(None) => Ok(registry.default_theme()),
		Err(err) => {
			warn!(error = %err, "failed to read persisted theme");
			Ok(registry.default_theme())
		}
	}
}

fn init_logging() {
	if let Err(err) = logging::initialize() {
		eprintln!("tinted-shop: logging disabled: {err:#}");
	}
}

/// Restore the theme, build the shell and run it until the user quits.
fn run_shop(registry: Arc<ThemeRegistry>, settings: ResolvedConfig) -> Result<()> {
	init_logging();
	info!(storage = %settings.storage_path.display(), "starting");

	let storage = FileStorage::new(settings.storage_path.clone());
	let mut store = ThemeStore::initialize(
		registry,
		Box::new(storage),
		StyleDocument::new(),
		settings.timings,
	);
	if let Some(id) = &settings.initial_theme
		&& store.current_id() != id
	{
		store.switch(id);
	}

	let catalog = Arc::new(HttpCatalog::new(
		settings.api_base.clone(),
		settings.request_timeout,
	));
	let mut app = App::new(
		store,
		catalog,
		Box::new(SimulatedSubmitter),
		settings.shell_options(),
	);

	let result = tinted_shop_tui::run(&mut app);
	if let Err(err) = &result {
		warn!(error = %err, "terminal ui failed");
	}
	result
}

#[cfg(test)]
mod tests {
	use tinted_shop_core::{MemoryStorage, THEME_STORAGE_KEY};

	use super::*;

	#[test]
	fn unknown_persisted_theme_falls_back_to_default() {
		let registry = ThemeRegistry::builtin();
		let storage = MemoryStorage::with_entry(THEME_STORAGE_KEY, "\"theme9\"");
		let theme = css_theme(&registry, None, &storage).unwrap();
		assert_eq!(theme.id, registry.default_id());
	}

	#[test]
	fn undecodable_persisted_theme_falls_back_to_default() {
		let registry = ThemeRegistry::builtin();
		let storage = MemoryStorage::with_entry(THEME_STORAGE_KEY, "theme2");
		let theme = css_theme(&registry, None, &storage).unwrap();
		assert_eq!(theme.id, registry.default_id());
	}

	#[test]
	fn persisted_theme_is_used() {
		let registry = ThemeRegistry::builtin();
		let storage = MemoryStorage::with_entry(THEME_STORAGE_KEY, "\"theme3\"");
		let theme = css_theme(&registry, None, &storage).unwrap();
		assert_eq!(theme.id, "theme3");
	}

	#[test]
	fn explicit_unknown_theme_is_rejected() {
		let registry = ThemeRegistry::builtin();
		let storage = MemoryStorage::new();
		let err = css_theme(&registry, Some("theme9"), &storage).unwrap_err();
		assert!(err.to_string().contains("unknown theme 'theme9'"));
	}
}
