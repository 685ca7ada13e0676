//! Terminal styling derived from the projected theme.
//!
//! The front end never reads theme tokens directly. It reads the style
//! variables the store projected into its [`StyleDocument`] and turns them
//! into colours ([`Palette`]) and cell measurements ([`Metrics`]).

mod colour;
mod metrics;
mod palette;

pub use colour::parse_color;
pub use metrics::{Length, Metrics};
pub use palette::Palette;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Padding};
use tinted_shop_core::StyleDocument;

/// Colours and measurements for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellStyle {
	/// Colours.
	pub palette: Palette,
	/// Cell measurements and emphasis.
	pub metrics: Metrics,
}

impl ShellStyle {
	/// Derive the style from the variables in `document`.
	#[must_use]
	pub fn from_document(document: &StyleDocument) -> Self {
		Self {
			palette: Palette::from_document(document),
			metrics: Metrics::from_document(document),
		}
	}

	/// Heading text.
	#[must_use]
	pub fn heading(&self) -> Style {
		self.palette.primary().add_modifier(self.metrics.heading)
	}

	/// Body text.
	#[must_use]
	pub fn body(&self) -> Style {
		Style::new().fg(self.palette.text).add_modifier(self.metrics.body)
	}

	/// Bordered panel on a surface background.
	#[must_use]
	pub fn panel<'a>(&self, title: impl Into<ratatui::text::Line<'a>>) -> Block<'a> {
		Block::default()
			.borders(Borders::ALL)
			.border_type(self.metrics.border_type)
			.border_style(self.palette.border())
			.style(self.palette.surface())
			.title(title)
			.title_style(self.heading())
			.padding(Padding::horizontal(self.metrics.padding_x))
	}

	/// Style for controls that currently ignore input.
	#[must_use]
	pub fn disabled(&self) -> Style {
		self.palette.muted().add_modifier(Modifier::DIM)
	}
}
