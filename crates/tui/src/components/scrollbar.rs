//! Scrolling helpers shared by the long views.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::style::Palette;

/// Row counts for a view that is taller than its viewport.
///
/// The about page measures rendered text lines, the catalogue measures rows
/// of product cards. Offsets are in the same unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
	/// Rows of content.
	pub rows: usize,
	/// Rows that fit in the viewport.
	pub visible: usize,
	/// Largest offset that still fills the viewport.
	pub max_offset: usize,
}

impl ScrollMetrics {
	/// Metrics for `rows` of content shown `height` rows at a time.
	#[must_use]
	pub fn compute(rows: usize, height: usize) -> Self {
		if rows == 0 || height == 0 {
			return Self::default();
		}
		let visible = height.min(rows);
		Self {
			rows,
			visible,
			max_offset: rows - visible,
		}
	}

	/// Whether the content overflows the viewport.
	#[must_use]
	pub fn overflows(&self) -> bool {
		self.max_offset > 0
	}

	/// Keep `offset` within the scrollable range.
	#[must_use]
	pub fn clamp(&self, offset: usize) -> usize {
		offset.min(self.max_offset)
	}

	/// Thumb position on a track of `rows` cells; the last offset lands on
	/// the last cell.
	#[must_use]
	pub fn thumb_position(&self, offset: usize) -> usize {
		if !self.overflows() {
			return 0;
		}
		self.clamp(offset) * (self.rows - 1) / self.max_offset
	}
}

/// Whether the mouse cell at `column`/`row` falls on `area`.
#[must_use]
pub fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
	area.contains(Position::new(column, row))
}

/// Draw a vertical scrollbar on the right edge of `area` and return the
/// remaining content area.
pub fn render_scrollbar(
	frame: &mut Frame,
	area: Rect,
	metrics: ScrollMetrics,
	scroll: usize,
	palette: &Palette,
) -> Rect {
	if !metrics.overflows() || area.width < 2 {
		return area;
	}

	let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
		.begin_symbol(None)
		.end_symbol(None)
		.track_symbol(Some("│"))
		.style(palette.border())
		.thumb_style(palette.accent());
	let mut state = ScrollbarState::new(metrics.rows)
		.viewport_content_length(metrics.visible)
		.position(metrics.thumb_position(scroll));

	let bar = Rect {
		x: area.x + area.width.saturating_sub(1),
		y: area.y,
		width: 1,
		height: area.height,
	};
	frame.render_stateful_widget(scrollbar, bar, &mut state);

	Rect {
		width: area.width.saturating_sub(1),
		..area
	}
}
