//! Projection of a [`ThemeConfig`] onto global style variables.
//!
//! Every token maps to exactly one variable, namespaced by category:
//!
//! | Token                     | Variable                 |
//! |---------------------------|--------------------------|
//! | `colors.<key>`            | `--color-<key>`          |
//! | `fonts.sizes.<key>`       | `--font-size-<key>`      |
//! | `spacing.<key>`           | `--spacing-<key>`        |
//! | `layout.<key>`            | `--layout-<key>`         |
//! | `fonts.primary/secondary` | `--font-primary/secondary` |
//! | `animations.transition`   | `--transition`           |
//! | `animations.duration`     | `--duration`             |
//!
//! The document additionally carries a single `theme-<id>` class.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use super::types::ThemeConfig;

/// Prefix shared by every active-theme class.
pub const THEME_CLASS_PREFIX: &str = "theme-";

/// Number of variables one projection writes.
pub const STYLE_VARIABLE_COUNT: usize = 8 + 4 + 4 + 4 + 2 + 2;

/// Destination for projected style variables.
pub trait StyleSink {
	/// Drop every variable currently set.
	fn clear_variables(&mut self);
	/// Set (or overwrite) a single variable.
	fn set_variable(&mut self, name: &str, value: &str);
	/// Remove every class starting with `prefix`.
	fn remove_classes_with_prefix(&mut self, prefix: &str);
	/// Add a class to the document.
	fn add_class(&mut self, class: &str);
}

/// Ordered `(variable, value)` pairs for `config`.
#[must_use]
pub fn style_variables(config: &ThemeConfig) -> Vec<(String, String)> {
	let mut vars = Vec::with_capacity(STYLE_VARIABLE_COUNT);

	for (key, value) in config.colors.entries() {
		vars.push((format!("--color-{key}"), value.to_string()));
	}
	for (key, value) in config.fonts.sizes.entries() {
		vars.push((format!("--font-size-{key}"), value.to_string()));
	}
	for (key, value) in config.spacing.entries() {
		vars.push((format!("--spacing-{key}"), value.to_string()));
	}
	for (key, value) in config.layout.entries() {
		vars.push((format!("--layout-{key}"), value.to_string()));
	}

	vars.push(("--font-primary".into(), config.fonts.primary.clone()));
	vars.push(("--font-secondary".into(), config.fonts.secondary.clone()));
	vars.push(("--transition".into(), config.animations.transition.clone()));
	vars.push(("--duration".into(), config.animations.duration.clone()));

	vars
}

/// Class marking `config` as the active theme.
#[must_use]
pub fn theme_class(config: &ThemeConfig) -> String {
	format!("{THEME_CLASS_PREFIX}{}", config.id)
}

/// Replace everything a previous projection wrote with `config`'s values.
pub fn project<S: StyleSink + ?Sized>(config: &ThemeConfig, sink: &mut S) {
	sink.clear_variables();
	for (name, value) in style_variables(config) {
		sink.set_variable(&name, &value);
	}
	sink.remove_classes_with_prefix(THEME_CLASS_PREFIX);
	sink.add_class(&theme_class(config));
}

/// In-memory stand-in for the document root the renderer reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDocument {
	variables: BTreeMap<String, String>,
	classes: BTreeSet<String>,
}

impl StyleDocument {
	/// Empty document.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Value of a single variable.
	#[must_use]
	pub fn variable(&self, name: &str) -> Option<&str> {
		self.variables.get(name).map(String::as_str)
	}

	/// All variables, sorted by name.
	#[must_use]
	pub fn variables(&self) -> &BTreeMap<String, String> {
		&self.variables
	}

	/// Whether `class` is present.
	#[must_use]
	pub fn has_class(&self, class: &str) -> bool {
		self.classes.contains(class)
	}

	/// All classes, sorted.
	pub fn classes(&self) -> impl Iterator<Item = &str> {
		self.classes.iter().map(String::as_str)
	}

	/// Identifier carried by the active `theme-*` class, if any.
	#[must_use]
	pub fn active_theme(&self) -> Option<&str> {
		self.classes
			.iter()
			.find_map(|class| class.strip_prefix(THEME_CLASS_PREFIX))
	}

	/// Render the variables as a CSS `:root` rule.
	#[must_use]
	pub fn to_css(&self) -> String {
		let mut css = String::from(":root {\n");
		for (name, value) in &self.variables {
			let _ = writeln!(css, "  {name}: {value};");
		}
		css.push_str("}\n");
		css
	}
}

impl StyleSink for StyleDocument {
	fn clear_variables(&mut self) {
		self.variables.clear();
	}

	fn set_variable(&mut self, name: &str, value: &str) {
		self.variables.insert(name.to_string(), value.to_string());
	}

	fn remove_classes_with_prefix(&mut self, prefix: &str) {
		self.classes.retain(|class| !class.starts_with(prefix));
	}

	fn add_class(&mut self, class: &str) {
		self.classes.insert(class.to_string());
	}
}
