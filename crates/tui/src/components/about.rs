//! Static description of the app and its themes.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use super::scrollbar::{ScrollMetrics, render_scrollbar};
use crate::style::ShellStyle;

const FEATURES: [(&str, &str); 5] = [
	(
		"Three Distinct Themes",
		"Each theme offers a completely different visual and structural experience.",
	),
	(
		"Persistent Theme Selection",
		"Your theme choice is saved locally and restored on the next launch.",
	),
	(
		"Responsive Layout",
		"Every theme adapts to the size of the terminal.",
	),
	(
		"Smooth Switching",
		"Theme changes show a short transition before they take effect.",
	),
	(
		"API Integration",
		"Real product data from fakestoreapi.com with proper error handling.",
	),
];

const THEMES: [(&str, &str); 3] = [
	(
		"Minimalist",
		"Clean and professional design with light colors and plenty of white space.",
	),
	(
		"Dark Sidebar",
		"Sophisticated dark theme with sidebar navigation and warm accent colors.",
	),
	(
		"Colorful Cards",
		"Vibrant and playful design with a card-based grid and bright colors.",
	),
];

const IMPLEMENTATION: [(&str, &str); 4] = [
	(
		"Theme Store",
		"A single store owns the active theme; later switches always win.",
	),
	(
		"Style Variables",
		"Every theme token is projected as a named variable the UI reads back.",
	),
	(
		"Component Styling",
		"Widgets derive colours, borders and spacing from those variables.",
	),
	(
		"Local Storage",
		"The chosen theme is kept in a small key-value file in the data directory.",
	),
];

/// Scroll position of the about page.
#[derive(Debug, Default)]
pub struct AboutView {
	scroll: usize,
	max_scroll: usize,
}

impl AboutView {
	/// Current scroll offset in lines.
	#[must_use]
	pub fn scroll(&self) -> usize {
		self.scroll
	}

	/// Up/Down/PageUp/PageDown scroll the page.
	pub fn handle_key(&mut self, key: KeyEvent) -> bool {
		let delta = match key.code {
			KeyCode::Up => -1,
			KeyCode::Down => 1,
			KeyCode::PageUp => -10,
			KeyCode::PageDown => 10,
			_ => return false,
		};
		self.scroll_by(delta);
		true
	}

	/// Scroll by `delta` lines.
	pub fn scroll_by(&mut self, delta: isize) {
		self.scroll = self
			.scroll
			.saturating_add_signed(delta)
			.min(self.max_scroll);
	}

	/// Draw the page into `area`.
	pub fn render(&mut self, frame: &mut Frame, area: Rect, style: &ShellStyle) {
		let text = page(style);
		let metrics = ScrollMetrics::compute(text.lines.len(), usize::from(area.height));
		self.max_scroll = metrics.max_offset;
		self.scroll = metrics.clamp(self.scroll);

		let content = render_scrollbar(frame, area, metrics, self.scroll, &style.palette);
		frame.render_widget(
			Paragraph::new(text)
				.style(style.body())
				.wrap(Wrap { trim: true })
				.scroll((self.scroll as u16, 0)),
			content,
		);
	}
}

fn page(style: &ShellStyle) -> Text<'static> {
	let mut lines = vec![
		Line::styled("About Multi-Theme Switcher", style.heading()),
		Line::styled(
			"A showcase of dynamic theming in a terminal application",
			style.palette.muted(),
		),
		Line::default(),
		Line::styled("Project Overview", style.heading()),
		Line::raw(
			"This app shows how themes can transform the whole experience: \
			 colours, layout, typography, spacing and transitions.",
		),
		Line::default(),
		Line::styled("Key Features", style.heading()),
	];
	bullets(&mut lines, &FEATURES, style);
	lines.push(Line::default());
	lines.push(Line::styled("Available Themes", style.heading()));
	bullets(&mut lines, &THEMES, style);
	lines.push(Line::default());
	lines.push(Line::styled("Technical Implementation", style.heading()));
	bullets(&mut lines, &IMPLEMENTATION, style);
	lines.push(Line::default());
	lines.push(Line::styled(
		"Try switching themes with the selector in the header, or press 1 for Home and 3 for Contact.",
		style.palette.muted(),
	));
	Text::from(lines)
}

fn bullets(
	lines: &mut Vec<Line<'static>>,
	entries: &[(&'static str, &'static str)],
	style: &ShellStyle,
) {
	for (title, body) in entries {
		lines.push(Line::from(vec![
			Span::styled("• ", style.palette.accent()),
			Span::styled(*title, style.palette.primary()),
			Span::raw(": "),
			Span::raw(*body),
		]));
	}
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;
	use tinted_shop_core::StyleDocument;

	use super::*;

	#[test]
	fn scrolling_stops_at_the_end() {
		let style = ShellStyle::from_document(&StyleDocument::new());
		let mut view = AboutView::default();
		let mut terminal = Terminal::new(TestBackend::new(200, 10)).unwrap();
		terminal
			.draw(|frame| view.render(frame, frame.area(), &style))
			.unwrap();

		view.scroll_by(1_000);
		assert_eq!(view.scroll(), view.max_scroll);
		assert!(view.scroll() > 0);
		view.handle_key(KeyEvent::from(KeyCode::PageUp));
		assert_eq!(view.scroll(), view.max_scroll - 10);
	}
}
