use ratatui::style::Modifier;
use ratatui::widgets::BorderType;
use tinted_shop_core::StyleDocument;

/// Pixels per terminal column.
const PX_PER_COLUMN: f32 = 8.0;
/// Pixels per terminal row.
const PX_PER_ROW: f32 = 16.0;
/// Pixels per `rem`.
const PX_PER_REM: f32 = 16.0;

/// A CSS-like length as found in layout and spacing variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
	/// Absolute length in pixels (`rem` is converted on parse).
	Px(f32),
	/// Fraction of the containing area, `0..=100`.
	Percent(f32),
}

impl Length {
	/// Parse `12px`, `1.5rem`, `100%`, or a bare `0`.
	#[must_use]
	pub fn parse(input: &str) -> Option<Self> {
		let value = input.trim();
		if let Some(number) = value.strip_suffix("px") {
			return number.trim().parse().ok().map(Self::Px);
		}
		if let Some(number) = value.strip_suffix("rem") {
			return number
				.trim()
				.parse::<f32>()
				.ok()
				.map(|rem| Self::Px(rem * PX_PER_REM));
		}
		if let Some(number) = value.strip_suffix('%') {
			return number.trim().parse().ok().map(Self::Percent);
		}
		value.parse::<f32>().ok().filter(|n| *n == 0.0).map(Self::Px)
	}

	/// Width in columns, resolving percentages against `available`.
	#[must_use]
	pub fn columns(self, available: u16) -> u16 {
		match self {
			Self::Px(px) => (px / PX_PER_COLUMN).round().max(0.0) as u16,
			Self::Percent(pct) => (f32::from(available) * pct / 100.0).round() as u16,
		}
	}

	/// Height in rows, resolving percentages against `available`.
	#[must_use]
	pub fn rows(self, available: u16) -> u16 {
		match self {
			Self::Px(px) => (px / PX_PER_ROW).round().max(0.0) as u16,
			Self::Percent(pct) => (f32::from(available) * pct / 100.0).round() as u16,
		}
	}
}

/// Layout measurements translated into terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
	/// Rows taken by the header bar.
	pub header_rows: u16,
	/// Columns taken by the sidebar when it is shown.
	pub sidebar_columns: u16,
	/// Cap on the content width.
	pub max_width: Length,
	/// Border drawn around cards and panels.
	pub border_type: BorderType,
	/// Horizontal padding inside panels.
	pub padding_x: u16,
	/// Vertical padding inside panels.
	pub padding_y: u16,
	/// Gap between product cards.
	pub card_gap: u16,
	/// Modifier applied to headings, derived from the primary font family.
	pub heading: Modifier,
	/// Modifier applied to body text, derived from the secondary font family.
	pub body: Modifier,
}

impl Default for Metrics {
	fn default() -> Self {
		Self {
			header_rows: 3,
			sidebar_columns: 0,
			max_width: Length::Percent(100.0),
			border_type: BorderType::Plain,
			padding_x: 1,
			padding_y: 0,
			card_gap: 1,
			heading: Modifier::BOLD,
			body: Modifier::empty(),
		}
	}
}

impl Metrics {
	/// Read measurements from the `--layout-*`, `--spacing-*` and `--font-*`
	/// variables of a projected document.
	#[must_use]
	pub fn from_document(document: &StyleDocument) -> Self {
		let defaults = Self::default();
		let length = |name: &str| document.variable(name).and_then(Length::parse);

		let header_rows = length("--layout-headerHeight")
			.map_or(defaults.header_rows, |len| len.rows(0).clamp(3, 6));
		let sidebar_columns = length("--layout-sidebarWidth").map_or(0, |len| len.columns(0));
		let max_width = length("--layout-maxWidth").unwrap_or(defaults.max_width);
		let border_type = match length("--layout-borderRadius") {
			Some(Length::Px(radius)) => border_for_radius(radius),
			_ => defaults.border_type,
		};
		let padding_x = length("--spacing-medium")
			.map_or(defaults.padding_x, |len| len.columns(0).clamp(1, 4));
		let padding_y = length("--spacing-small").map_or(defaults.padding_y, |len| len.rows(0).min(1));
		let card_gap = length("--spacing-large")
			.map_or(defaults.card_gap, |len| len.columns(0).clamp(1, 4));

		let heading = document
			.variable("--font-primary")
			.map_or(defaults.heading, |family| font_modifier(family) | Modifier::BOLD);
		let body = document
			.variable("--font-secondary")
			.map_or(defaults.body, font_modifier);

		Self {
			header_rows,
			sidebar_columns,
			max_width,
			border_type,
			padding_x,
			padding_y,
			card_gap,
			heading,
			body,
		}
	}
}

impl Metrics {
	/// Width of the content column inside `available` columns.
	#[must_use]
	pub fn content_width(&self, available: u16) -> u16 {
		self.max_width.columns(available).min(available)
	}
}

fn border_for_radius(radius_px: f32) -> BorderType {
	if radius_px <= 8.0 {
		BorderType::Plain
	} else if radius_px < 20.0 {
		BorderType::Rounded
	} else {
		BorderType::Double
	}
}

/// Terminals have one typeface, so families only change the emphasis.
fn font_modifier(family: &str) -> Modifier {
	let generic = family
		.rsplit(',')
		.next()
		.map(|part| part.trim().to_ascii_lowercase())
		.unwrap_or_default();
	match generic.as_str() {
		"cursive" | "fantasy" => Modifier::ITALIC | Modifier::BOLD,
		"serif" => Modifier::ITALIC,
		_ => Modifier::empty(),
	}
}
