use ratatui::style::{Color, Modifier, Style};
use tinted_shop_core::StyleDocument;
use tinted_shop_core::theme::ColorTokens;
use tracing::warn;

use super::colour::parse_color;

/// Terminal colours resolved from the `--color-*` style variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
	/// `--color-primary`.
	pub primary: Color,
	/// `--color-secondary`.
	pub secondary: Color,
	/// `--color-background`.
	pub background: Color,
	/// `--color-surface`.
	pub surface: Color,
	/// `--color-text`.
	pub text: Color,
	/// `--color-textSecondary`.
	pub text_secondary: Color,
	/// `--color-border`.
	pub border: Color,
	/// `--color-accent`.
	pub accent: Color,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			primary: Color::Blue,
			secondary: Color::Gray,
			background: Color::Reset,
			surface: Color::Reset,
			text: Color::Reset,
			text_secondary: Color::DarkGray,
			border: Color::DarkGray,
			accent: Color::Cyan,
		}
	}
}

impl Palette {
	/// Read the palette from a projected style document. Missing or
	/// unparsable variables keep the terminal default for that slot.
	#[must_use]
	pub fn from_document(document: &StyleDocument) -> Self {
		let fallback = Self::default();
		let read = |name: &str, default: Color| match document.variable(name) {
			Some(value) => parse_color(value).unwrap_or_else(|err| {
				warn!(variable = name, error = %err, "unusable colour variable");
				default
			}),
			None => default,
		};

		Self {
			primary: read("--color-primary", fallback.primary),
			secondary: read("--color-secondary", fallback.secondary),
			background: read("--color-background", fallback.background),
			surface: read("--color-surface", fallback.surface),
			text: read("--color-text", fallback.text),
			text_secondary: read("--color-textSecondary", fallback.text_secondary),
			border: read("--color-border", fallback.border),
			accent: read("--color-accent", fallback.accent),
		}
	}

	/// Swatch colours (primary, secondary, accent) for a theme preview.
	#[must_use]
	pub fn swatches(colors: &ColorTokens) -> [Color; 3] {
		[&colors.primary, &colors.secondary, &colors.accent]
			.map(|value| parse_color(value).unwrap_or(Color::Reset))
	}

	/// Page background with body text.
	#[must_use]
	pub fn base(&self) -> Style {
		Style::new().fg(self.text).bg(self.background)
	}

	/// Raised surfaces such as cards, menus and the sidebar.
	#[must_use]
	pub fn surface(&self) -> Style {
		Style::new().fg(self.text).bg(self.surface)
	}

	/// De-emphasised text.
	#[must_use]
	pub fn muted(&self) -> Style {
		Style::new().fg(self.text_secondary)
	}

	/// Borders and dividers.
	#[must_use]
	pub fn border(&self) -> Style {
		Style::new().fg(self.border)
	}

	/// Primary-coloured emphasis.
	#[must_use]
	pub fn primary(&self) -> Style {
		Style::new().fg(self.primary)
	}

	/// Accent-coloured emphasis.
	#[must_use]
	pub fn accent(&self) -> Style {
		Style::new().fg(self.accent)
	}

	/// Filled button in the primary colour.
	#[must_use]
	pub fn button(&self) -> Style {
		Style::new()
			.fg(self.background)
			.bg(self.primary)
			.add_modifier(Modifier::BOLD)
	}

	/// Highlight for the focused or active item.
	#[must_use]
	pub fn selection(&self) -> Style {
		Style::new().fg(self.background).bg(self.accent)
	}
}

#[cfg(test)]
mod tests {
	use tinted_shop_core::theme::{ThemeRegistry, project};

	use super::*;

	#[test]
	fn palette_follows_projected_variables() {
		let registry = ThemeRegistry::builtin();
		let mut document = StyleDocument::new();
		project(registry.get("theme2").unwrap(), &mut document);

		let palette = Palette::from_document(&document);
		assert_eq!(palette.background, Color::Rgb(0x11, 0x18, 0x27));
		assert_eq!(palette.primary, Color::Rgb(0xf5, 0x9e, 0x0b));
	}

	#[test]
	fn empty_document_uses_terminal_defaults() {
		assert_eq!(Palette::from_document(&StyleDocument::new()), Palette::default());
	}
}
