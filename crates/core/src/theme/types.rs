use serde::{Deserialize, Serialize};

/// The eight named colours every theme defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColorTokens {
	/// Brand colour used for primary actions and headings.
	pub primary: String,
	/// Supporting colour for secondary actions.
	pub secondary: String,
	/// Page background.
	pub background: String,
	/// Background of raised surfaces such as cards and menus.
	pub surface: String,
	/// Body text colour.
	pub text: String,
	/// Muted text colour.
	pub text_secondary: String,
	/// Border and divider colour.
	pub border: String,
	/// Highlight colour.
	pub accent: String,
}

impl ColorTokens {
	/// Named entries in declaration order, keyed by their style-variable suffix.
	#[must_use]
	pub fn entries(&self) -> [(&'static str, &str); 8] {
		[
			("primary", &self.primary),
			("secondary", &self.secondary),
			("background", &self.background),
			("surface", &self.surface),
			("text", &self.text),
			("textSecondary", &self.text_secondary),
			("border", &self.border),
			("accent", &self.accent),
		]
	}
}

/// A four-step size scale shared by font sizes and spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleTokens {
	/// Smallest step.
	pub small: String,
	/// Default step.
	pub medium: String,
	/// Larger step.
	pub large: String,
	/// Largest step.
	pub xlarge: String,
}

impl ScaleTokens {
	/// Named entries from smallest to largest.
	#[must_use]
	pub fn entries(&self) -> [(&'static str, &str); 4] {
		[
			("small", &self.small),
			("medium", &self.medium),
			("large", &self.large),
			("xlarge", &self.xlarge),
		]
	}
}

/// Font family pair plus the size scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontTokens {
	/// Family used for headings and emphasis.
	pub primary: String,
	/// Family used for body copy.
	pub secondary: String,
	/// Size scale.
	pub sizes: ScaleTokens,
}

/// Structural measurements of the page chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutTokens {
	/// Maximum width of the main content column.
	pub max_width: String,
	/// Height of the header bar.
	pub header_height: String,
	/// Width of the sidebar; `0px` for themes without one.
	pub sidebar_width: String,
	/// Corner radius of cards and controls.
	pub border_radius: String,
}

impl LayoutTokens {
	/// Named entries keyed by their style-variable suffix.
	#[must_use]
	pub fn entries(&self) -> [(&'static str, &str); 4] {
		[
			("maxWidth", &self.max_width),
			("headerHeight", &self.header_height),
			("sidebarWidth", &self.sidebar_width),
			("borderRadius", &self.border_radius),
		]
	}
}

/// Transition timing applied when the theme changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationTokens {
	/// Transition shorthand, e.g. `all 0.3s ease`.
	pub transition: String,
	/// Transition duration, e.g. `300ms`.
	pub duration: String,
}

/// Complete, immutable description of one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
	/// Stable identifier used for lookup and persistence.
	pub id: String,
	/// Human-readable name shown in the selector.
	pub name: String,
	/// Colour palette.
	pub colors: ColorTokens,
	/// Typography.
	pub fonts: FontTokens,
	/// Spacing scale.
	pub spacing: ScaleTokens,
	/// Layout measurements.
	pub layout: LayoutTokens,
	/// Animation timing.
	pub animations: AnimationTokens,
}

/// Snapshot of the theme the store currently exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveThemeState {
	/// Identifier of the committed theme.
	pub id: String,
	/// Resolved configuration for `id`.
	pub config: ThemeConfig,
	/// Whether a switch (or the initial settle) is still pending.
	pub loading: bool,
}
