//! Frame around every view: header, optional sidebar, footer and the
//! overlay shown while a theme switch is in flight.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tinted_shop_core::ThemeConfig;
use unicode_width::UnicodeWidthStr;

use super::scrollbar::point_in_rect;
use crate::config::View;
use crate::style::ShellStyle;

const FOOTER_ROWS: u16 = 2;

/// Whether the layout for `active_id` includes the sidebar.
#[must_use]
pub fn shows_sidebar(active_id: &str, sidebar_theme: &str) -> bool {
	active_id == sidebar_theme
}

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
	/// Header bar.
	pub header: Rect,
	/// Sidebar, when the active theme has one.
	pub sidebar: Option<Rect>,
	/// Content column for the current view.
	pub content: Rect,
	/// Footer bar.
	pub footer: Rect,
}

impl ShellLayout {
	/// Split `area` using the active theme's measurements.
	#[must_use]
	pub fn compute(area: Rect, style: &ShellStyle, sidebar: bool) -> Self {
		let metrics = &style.metrics;
		let [header, body, footer] = Layout::vertical([
			Constraint::Length(metrics.header_rows),
			Constraint::Min(0),
			Constraint::Length(FOOTER_ROWS),
		])
		.areas(area);

		let (sidebar, main) = if sidebar && metrics.sidebar_columns > 0 {
			let width = metrics.sidebar_columns.min(body.width / 2);
			let [side, main] =
				Layout::horizontal([Constraint::Length(width), Constraint::Min(0)]).areas(body);
			(Some(side), main)
		} else {
			(None, body)
		};

		let width = metrics.content_width(main.width);
		let padding = metrics.padding_x.min(width / 4);
		let content = Rect {
			x: main.x + (main.width - width) / 2 + padding,
			y: main.y + metrics.padding_y.min(main.height),
			width: width.saturating_sub(padding * 2),
			height: main.height.saturating_sub(metrics.padding_y * 2),
		};

		Self {
			header,
			sidebar,
			content,
			footer,
		}
	}
}

/// Clickable navigation entries from the last frame.
#[derive(Debug, Default, Clone)]
pub struct NavTargets {
	targets: Vec<(View, Rect)>,
}

impl NavTargets {
	/// Forget the previous frame's entries.
	pub fn clear(&mut self) {
		self.targets.clear();
	}

	fn push(&mut self, view: View, area: Rect) {
		self.targets.push((view, area));
	}

	/// View whose entry covers (`column`, `row`).
	#[must_use]
	pub fn view_at(&self, column: u16, row: u16) -> Option<View> {
		self.targets
			.iter()
			.find(|(_, area)| point_in_rect(column, row, *area))
			.map(|(view, _)| *view)
	}
}

/// Draw the header and return the area reserved for the theme selector.
pub fn render_header(
	frame: &mut Frame,
	area: Rect,
	app_name: &str,
	view: View,
	selector_width: u16,
	style: &ShellStyle,
	nav: &mut NavTargets,
) -> Rect {
	let block = Block::default()
		.borders(Borders::BOTTOM)
		.border_type(style.metrics.border_type)
		.border_style(style.palette.border())
		.style(style.palette.surface());
	let inner = block.inner(area);
	frame.render_widget(block, area);
	if inner.height == 0 {
		return Rect::default();
	}

	let row = Rect {
		y: inner.y + inner.height.saturating_sub(1) / 2,
		height: 1,
		..inner
	};
	let [title, tabs, selector] = Layout::horizontal([
		Constraint::Length(app_name.width() as u16 + 2),
		Constraint::Min(0),
		Constraint::Length(selector_width),
	])
	.areas(row);

	frame.render_widget(
		Span::styled(format!(" {app_name}"), style.heading()),
		title,
	);

	let mut x = tabs.x + 1;
	for entry in View::ALL {
		let label = format!(" {} {} ", entry.shortcut(), entry.label());
		let width = (label.width() as u16).min(tabs.right().saturating_sub(x));
		if width == 0 {
			break;
		}
		let tab_style = if entry == view {
			style.palette.selection()
		} else {
			style.body()
		};
		let tab = Rect {
			x,
			width,
			..tabs
		};
		frame.render_widget(Span::styled(label, tab_style), tab);
		nav.push(entry, tab);
		x = x.saturating_add(width + 1);
	}

	selector
}

/// Draw the sidebar for the active theme.
pub fn render_sidebar(
	frame: &mut Frame,
	area: Rect,
	config: &ThemeConfig,
	view: View,
	style: &ShellStyle,
	nav: &mut NavTargets,
) {
	let block = Block::default()
		.borders(Borders::RIGHT)
		.border_type(style.metrics.border_type)
		.border_style(style.palette.border())
		.style(style.palette.surface());
	let inner = block.inner(area).inner(ratatui::layout::Margin {
		horizontal: style.metrics.padding_x,
		vertical: 1,
	});
	frame.render_widget(block, area);

	let [navigation, stats, info] = Layout::vertical([
		Constraint::Length(View::ALL.len() as u16 + 2),
		Constraint::Length(5),
		Constraint::Min(0),
	])
	.areas(inner);

	frame.render_widget(Line::styled("Navigation", style.heading()), navigation);
	for (offset, entry) in View::ALL.into_iter().enumerate() {
		let link = Rect {
			y: navigation.y + 1 + offset as u16,
			height: 1,
			..navigation
		};
		if link.bottom() > navigation.bottom() {
			break;
		}
		let link_style = if entry == view {
			style.palette.accent().add_modifier(Modifier::BOLD)
		} else {
			style.body()
		};
		frame.render_widget(Span::styled(format!("› {}", entry.label()), link_style), link);
		nav.push(entry, link);
	}

	let stat = |label: &'static str, value: String| {
		Line::from(vec![
			Span::styled(format!("{label} "), style.palette.muted()),
			Span::styled(value, style.palette.accent()),
		])
	};
	let lines = vec![
		Line::styled("Quick Stats", style.heading()),
		stat("Current Theme:", config.name.clone()),
		stat("Layout:", "Sidebar".to_string()),
		stat("Font:", font_class(&config.fonts.primary)),
	];
	frame.render_widget(Paragraph::new(lines), stats);

	let description = vec![
		Line::styled("Theme Info", style.heading()),
		Line::styled(
			"This dark sidebar theme provides a professional and elegant layout \
			 perfect for content-heavy applications.",
			style.body(),
		),
	];
	frame.render_widget(Paragraph::new(description).wrap(Wrap { trim: true }), info);
}

/// Generic family of a CSS font stack, capitalised (`'Inter', serif` → `Serif`).
fn font_class(stack: &str) -> String {
	let generic = stack.rsplit(',').next().unwrap_or(stack).trim().trim_matches(['\'', '"']);
	let mut chars = generic.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Draw the footer.
pub fn render_footer(frame: &mut Frame, area: Rect, app_name: &str, style: &ShellStyle) {
	let block = Block::default()
		.borders(Borders::TOP)
		.border_type(style.metrics.border_type)
		.border_style(style.palette.border())
		.style(style.palette.surface());
	let inner = block.inner(area);
	frame.render_widget(block, area);

	let [left, right] =
		Layout::horizontal([Constraint::Min(0), Constraint::Length(44)]).areas(inner);
	frame.render_widget(
		Span::styled(
			format!(" © 2025 {app_name} App. Built with Rust & ratatui."),
			style.palette.muted(),
		),
		left,
	);
	frame.render_widget(
		Paragraph::new(Line::styled(
			"Privacy Policy · Terms of Service · Support ",
			style.palette.muted(),
		))
		.alignment(Alignment::Right),
		right,
	);
}

/// Blocking overlay drawn on top of everything while a switch is pending.
pub fn render_overlay(frame: &mut Frame, area: Rect, style: &ShellStyle, throbber: &ThrobberState) {
	let width = 28.min(area.width);
	let height = 3.min(area.height);
	let popup = Rect {
		x: area.x + (area.width - width) / 2,
		y: area.y + (area.height - height) / 2,
		width,
		height,
	};

	let spinner = Throbber::default()
		.style(style.palette.accent())
		.throbber_style(style.palette.accent())
		.to_symbol_span(throbber);
	let line = Line::from(vec![spinner, Span::styled("Switching theme...", style.body())]);

	frame.render_widget(Clear, popup);
	frame.render_widget(
		Paragraph::new(line)
			.alignment(Alignment::Center)
			.block(style.panel(Line::default())),
		popup,
	);
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;
	use tinted_shop_core::StyleDocument;
	use tinted_shop_core::theme::{ThemeRegistry, project};

	use super::*;

	fn style_for(id: &str) -> ShellStyle {
		let registry = ThemeRegistry::builtin();
		let mut document = StyleDocument::new();
		project(registry.get(id).unwrap(), &mut document);
		ShellStyle::from_document(&document)
	}

	#[test]
	fn sidebar_belongs_to_one_theme() {
		assert!(shows_sidebar("theme2", "theme2"));
		assert!(!shows_sidebar("theme1", "theme2"));
		assert!(!shows_sidebar("theme3", "theme2"));
	}

	#[test]
	fn layout_reserves_sidebar_columns() {
		let area = Rect::new(0, 0, 120, 40);
		let with = ShellLayout::compute(area, &style_for("theme2"), true);
		let sidebar = with.sidebar.unwrap();
		assert_eq!(sidebar.width, 35);
		assert!(with.content.x >= sidebar.right());
		assert_eq!(with.header.height, 5);

		let without = ShellLayout::compute(area, &style_for("theme1"), false);
		assert_eq!(without.sidebar, None);
		assert_eq!(without.header.height, 4);
	}

	#[test]
	fn font_class_uses_the_generic_family() {
		assert_eq!(font_class("'Playfair Display', serif"), "Serif");
		assert_eq!(font_class("'Pacifico', cursive"), "Cursive");
	}

	#[test]
	fn header_tabs_are_clickable() {
		let style = style_for("theme1");
		let mut nav = NavTargets::default();
		let mut terminal = Terminal::new(TestBackend::new(100, 4)).unwrap();
		terminal
			.draw(|frame| {
				render_header(frame, frame.area(), "Shop", View::Home, 20, &style, &mut nav);
			})
			.unwrap();

		let rendered = format!("{:?}", terminal.backend().buffer());
		assert!(rendered.contains("2 About"));
		let about = nav
			.targets
			.iter()
			.find(|(view, _)| *view == View::About)
			.map(|(_, area)| *area)
			.unwrap();
		assert_eq!(nav.view_at(about.x, about.y), Some(View::About));
	}
}
