use std::sync::Arc;

use tracing::warn;

use super::builtins::builtin_themes;
use super::types::ThemeConfig;

/// Immutable table of themes keyed by identifier.
///
/// Built once at startup and shared behind an [`Arc`]; nothing mutates it
/// afterwards. Iteration order is the order the definitions were loaded in.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
	themes: Vec<Arc<ThemeConfig>>,
	default_index: usize,
}

impl ThemeRegistry {
	/// Registry holding the bundled `theme1`, `theme2` and `theme3` themes.
	#[must_use]
	pub fn builtin() -> Self {
		let builtins = builtin_themes();
		let themes: Vec<Arc<ThemeConfig>> =
			builtins.themes.iter().cloned().map(Arc::new).collect();
		let default_index = themes
			.iter()
			.position(|theme| theme.id == builtins.default_id)
			.unwrap_or(0);
		Self {
			themes,
			default_index,
		}
	}

	/// Build a registry from explicit configurations.
	///
	/// Returns `None` when `themes` is empty or `default_id` is not among them.
	#[must_use]
	pub fn from_configs(themes: Vec<ThemeConfig>, default_id: &str) -> Option<Self> {
		let default_index = themes
			.iter()
			.position(|theme| theme.id.eq_ignore_ascii_case(default_id))?;
		Some(Self {
			themes: themes.into_iter().map(Arc::new).collect(),
			default_index,
		})
	}

	/// Lookup a theme by case-insensitive identifier.
	#[must_use]
	pub fn get(&self, id: &str) -> Option<&ThemeConfig> {
		let normalized = normalize_id(id);
		self.themes
			.iter()
			.find(|theme| theme.id.eq_ignore_ascii_case(&normalized))
			.map(Arc::as_ref)
	}

	/// Lookup a theme, substituting the default for unknown identifiers.
	pub fn resolve(&self, id: &str) -> &ThemeConfig {
		match self.get(id) {
			Some(theme) => theme,
			None => {
				warn!(theme = id, fallback = %self.default_id(), "unknown theme identifier");
				self.default_theme()
			}
		}
	}

	/// Whether `id` names a registered theme.
	#[must_use]
	pub fn contains(&self, id: &str) -> bool {
		self.get(id).is_some()
	}

	/// The theme used when nothing else applies.
	#[must_use]
	pub fn default_theme(&self) -> &ThemeConfig {
		&self.themes[self.default_index]
	}

	/// Identifier of [`Self::default_theme`].
	#[must_use]
	pub fn default_id(&self) -> &str {
		&self.default_theme().id
	}

	/// Identifiers in registry order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.themes.iter().map(|theme| theme.id.as_str())
	}

	/// Themes in registry order.
	pub fn iter(&self) -> impl Iterator<Item = &ThemeConfig> {
		self.themes.iter().map(Arc::as_ref)
	}

	/// Number of registered themes.
	#[must_use]
	pub fn len(&self) -> usize {
		self.themes.len()
	}

	/// Registries always hold at least one theme.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.themes.is_empty()
	}

	/// Position of `id` in registry order.
	#[must_use]
	pub fn position(&self, id: &str) -> Option<usize> {
		self.themes
			.iter()
			.position(|theme| theme.id.eq_ignore_ascii_case(id.trim()))
	}
}

fn normalize_id(id: &str) -> String {
	id.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_registry_has_three_themes_in_order() {
		let registry = ThemeRegistry::builtin();
		let ids: Vec<_> = registry.ids().collect();
		assert_eq!(ids, ["theme1", "theme2", "theme3"]);
		assert_eq!(registry.default_id(), "theme1");
	}

	#[test]
	fn builtin_names_match_catalogue() {
		let registry = ThemeRegistry::builtin();
		let names: Vec<_> = registry.iter().map(|theme| theme.name.as_str()).collect();
		assert_eq!(names, ["Minimalist", "Dark Sidebar", "Colorful Cards"]);
	}

	#[test]
	fn lookup_is_case_insensitive_and_trimmed() {
		let registry = ThemeRegistry::builtin();
		assert_eq!(registry.get(" THEME2 ").map(|t| t.id.as_str()), Some("theme2"));
		assert!(registry.get("theme4").is_none());
	}

	#[test]
	fn unknown_identifier_resolves_to_default() {
		let registry = ThemeRegistry::builtin();
		assert_eq!(registry.resolve("neon").id, "theme1");
		assert_eq!(registry.resolve("theme3").id, "theme3");
	}

	#[test]
	fn key_sets_are_identical_across_themes() {
		let registry = ThemeRegistry::builtin();
		let shape = |theme: &ThemeConfig| {
			let mut keys: Vec<&str> = theme.colors.entries().iter().map(|(k, _)| *k).collect();
			keys.extend(theme.fonts.sizes.entries().iter().map(|(k, _)| *k));
			keys.extend(theme.spacing.entries().iter().map(|(k, _)| *k));
			keys.extend(theme.layout.entries().iter().map(|(k, _)| *k));
			keys
		};
		let first = shape(registry.default_theme());
		for theme in registry.iter() {
			assert_eq!(shape(theme), first, "{} diverges", theme.id);
		}
	}

	#[test]
	fn from_configs_requires_known_default() {
		let theme = ThemeRegistry::builtin().default_theme().clone();
		assert!(ThemeRegistry::from_configs(vec![theme.clone()], "missing").is_none());
		let registry = ThemeRegistry::from_configs(vec![theme], "theme1").unwrap();
		assert_eq!(registry.len(), 1);
	}
}
