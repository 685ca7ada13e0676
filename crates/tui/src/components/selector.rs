//! Disclosure control for picking the active theme.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, List, ListItem, ListState};
use tinted_shop_core::ThemeRegistry;
use unicode_width::UnicodeWidthStr;

use super::scrollbar::point_in_rect;
use crate::style::{Palette, ShellStyle};

/// What the selector did with an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOutcome {
	/// The event was not meant for the selector.
	Ignored,
	/// The selector handled the event itself.
	Consumed,
	/// A click landed outside the open list; the list closed and the click
	/// should still reach whatever is under it.
	Dismissed,
	/// The user picked a theme.
	Selected(String),
}

/// Everything the selector reads while drawing.
pub struct SelectorContext<'a> {
	/// Themes to list.
	pub registry: &'a ThemeRegistry,
	/// Committed theme.
	pub active_id: &'a str,
	/// Whether the control holds keyboard focus.
	pub focused: bool,
	/// Whether a switch is in flight.
	pub disabled: bool,
	/// Colours and measurements.
	pub style: &'a ShellStyle,
}

/// Open/closed state, keyboard focus and the last rendered hit areas.
#[derive(Debug, Default)]
pub struct ThemeSelector {
	open: bool,
	focused: usize,
	toggle_area: Rect,
	list_area: Rect,
}

impl ThemeSelector {
	/// Whether the option list is showing.
	#[must_use]
	pub fn is_open(&self) -> bool {
		self.open
	}

	/// Index of the focused entry while open.
	#[must_use]
	pub fn focused(&self) -> usize {
		self.focused
	}

	/// Show the list with the active theme focused.
	pub fn open(&mut self, registry: &ThemeRegistry, active_id: &str) {
		self.open = true;
		self.focused = registry.position(active_id).unwrap_or(0);
	}

	/// Hide the list.
	pub fn close(&mut self) {
		self.open = false;
	}

	/// Handle a key while the control has focus.
	pub fn handle_key(
		&mut self,
		key: KeyEvent,
		registry: &ThemeRegistry,
		active_id: &str,
		disabled: bool,
	) -> SelectorOutcome {
		if disabled {
			return SelectorOutcome::Ignored;
		}

		if !self.open {
			return match key.code {
				KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
					self.open(registry, active_id);
					SelectorOutcome::Consumed
				}
				_ => SelectorOutcome::Ignored,
			};
		}

		match key.code {
			KeyCode::Esc => {
				self.close();
				SelectorOutcome::Consumed
			}
			KeyCode::Up => {
				self.focused = self.focused.saturating_sub(1);
				SelectorOutcome::Consumed
			}
			KeyCode::Down => {
				if self.focused + 1 < registry.len() {
					self.focused += 1;
				}
				SelectorOutcome::Consumed
			}
			KeyCode::Enter | KeyCode::Char(' ') => self.select(registry, self.focused),
			// Tab leaves the control, closing it like a lost focus would.
			KeyCode::Tab | KeyCode::BackTab => {
				self.close();
				SelectorOutcome::Ignored
			}
			_ => SelectorOutcome::Consumed,
		}
	}

	/// Handle a left click at (`column`, `row`).
	pub fn handle_click(
		&mut self,
		column: u16,
		row: u16,
		registry: &ThemeRegistry,
		active_id: &str,
		disabled: bool,
	) -> SelectorOutcome {
		if disabled {
			return SelectorOutcome::Ignored;
		}

		if point_in_rect(column, row, self.toggle_area) {
			if self.open {
				self.close();
			} else {
				self.open(registry, active_id);
			}
			return SelectorOutcome::Consumed;
		}

		if !self.open {
			return SelectorOutcome::Ignored;
		}

		if point_in_rect(column, row, self.list_area) {
			// One row per entry inside a one-cell border.
			let offset = row.saturating_sub(self.list_area.y + 1) as usize;
			if row > self.list_area.y && offset < registry.len() {
				return self.select(registry, offset);
			}
			return SelectorOutcome::Consumed;
		}

		self.close();
		SelectorOutcome::Dismissed
	}

	fn select(&mut self, registry: &ThemeRegistry, index: usize) -> SelectorOutcome {
		self.close();
		match registry.iter().nth(index) {
			Some(theme) => SelectorOutcome::Selected(theme.id.clone()),
			None => SelectorOutcome::Consumed,
		}
	}

	/// Draw the closed control into `area`.
	pub fn render_toggle(&mut self, frame: &mut Frame, area: Rect, ctx: &SelectorContext<'_>) {
		let SelectorContext {
			registry,
			active_id,
			focused,
			disabled,
			style,
		} = *ctx;
		self.toggle_area = area;
		let name = registry.get(active_id).map_or(active_id, |theme| theme.name.as_str());
		let arrow = if self.open { "▴" } else { "▾" };

		let label_style = if disabled {
			style.disabled()
		} else if focused {
			style.palette.selection()
		} else {
			style.palette.surface()
		};
		frame.render_widget(Span::styled(format!(" {name} {arrow} "), label_style), area);
	}

	/// Width the closed control needs for the widest theme name.
	#[must_use]
	pub fn toggle_width(registry: &ThemeRegistry) -> u16 {
		let widest = registry
			.iter()
			.map(|theme| theme.name.width())
			.max()
			.unwrap_or(0);
		(widest as u16).saturating_add(4)
	}

	/// Draw the open list below the control, clipped to `bounds`.
	pub fn render_menu(&mut self, frame: &mut Frame, bounds: Rect, ctx: &SelectorContext<'_>) {
		let SelectorContext {
			registry,
			active_id,
			style,
			..
		} = *ctx;
		if !self.open {
			self.list_area = Rect::default();
			return;
		}

		let items: Vec<ListItem> = registry
			.iter()
			.map(|theme| {
				let [primary, secondary, accent] = Palette::swatches(&theme.colors);
				let marker = if theme.id == active_id { "✓" } else { " " };
				ListItem::new(Line::from(vec![
					Span::styled("■", Style::new().fg(primary)),
					Span::styled("■", Style::new().fg(secondary)),
					Span::styled("■", Style::new().fg(accent)),
					Span::raw(" "),
					Span::raw(theme.name.clone()),
					Span::raw(" "),
					Span::styled(marker, style.palette.accent()),
				]))
			})
			.collect();

		let width = (Self::toggle_width(registry) + 6).min(bounds.width);
		let height = (registry.len() as u16 + 2).min(bounds.height);
		let right = self.toggle_area.right().min(bounds.right());
		let x = right.saturating_sub(width).max(bounds.x);
		let y = self.toggle_area.bottom().max(bounds.y);
		let area = Rect {
			x,
			y,
			width,
			height: height.min(bounds.bottom().saturating_sub(y)),
		};
		self.list_area = area;

		let list = List::new(items)
			.block(style.panel("Themes"))
			.highlight_style(style.palette.selection());
		let mut state = ListState::default().with_selected(Some(self.focused));
		frame.render_widget(Clear, area);
		frame.render_stateful_widget(list, area, &mut state);
	}
}

#[cfg(test)]
mod tests {
	use ratatui::crossterm::event::KeyModifiers;

	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn laid_out() -> ThemeSelector {
		ThemeSelector {
			open: false,
			focused: 0,
			toggle_area: Rect::new(60, 1, 18, 1),
			list_area: Rect::new(54, 2, 24, 5),
		}
	}

	#[test]
	fn keyboard_opens_moves_and_selects() {
		let registry = ThemeRegistry::builtin();
		let mut selector = ThemeSelector::default();

		assert_eq!(
			selector.handle_key(key(KeyCode::Enter), &registry, "theme1", false),
			SelectorOutcome::Consumed
		);
		assert!(selector.is_open());
		assert_eq!(selector.focused(), 0);

		selector.handle_key(key(KeyCode::Down), &registry, "theme1", false);
		selector.handle_key(key(KeyCode::Down), &registry, "theme1", false);
		selector.handle_key(key(KeyCode::Down), &registry, "theme1", false);
		assert_eq!(selector.focused(), 2);

		assert_eq!(
			selector.handle_key(key(KeyCode::Char(' ')), &registry, "theme1", false),
			SelectorOutcome::Selected("theme3".into())
		);
		assert!(!selector.is_open());
	}

	#[test]
	fn opening_focuses_the_active_theme() {
		let registry = ThemeRegistry::builtin();
		let mut selector = ThemeSelector::default();
		selector.open(&registry, "theme2");
		assert_eq!(selector.focused(), 1);
	}

	#[test]
	fn escape_closes_without_selecting() {
		let registry = ThemeRegistry::builtin();
		let mut selector = ThemeSelector::default();
		selector.open(&registry, "theme1");
		assert_eq!(
			selector.handle_key(key(KeyCode::Esc), &registry, "theme1", false),
			SelectorOutcome::Consumed
		);
		assert!(!selector.is_open());
	}

	#[test]
	fn input_is_ignored_while_disabled() {
		let registry = ThemeRegistry::builtin();
		let mut selector = laid_out();
		assert_eq!(
			selector.handle_key(key(KeyCode::Enter), &registry, "theme1", true),
			SelectorOutcome::Ignored
		);
		assert_eq!(
			selector.handle_click(61, 1, &registry, "theme1", true),
			SelectorOutcome::Ignored
		);
		assert!(!selector.is_open());
	}

	#[test]
	fn clicks_toggle_select_and_dismiss() {
		let registry = ThemeRegistry::builtin();
		let mut selector = laid_out();

		assert_eq!(
			selector.handle_click(61, 1, &registry, "theme1", false),
			SelectorOutcome::Consumed
		);
		assert!(selector.is_open());

		// Second entry sits one row below the list border's first row.
		assert_eq!(
			selector.handle_click(56, 4, &registry, "theme1", false),
			SelectorOutcome::Selected("theme2".into())
		);

		selector.open(&registry, "theme1");
		assert_eq!(
			selector.handle_click(5, 20, &registry, "theme1", false),
			SelectorOutcome::Dismissed
		);
		assert!(!selector.is_open());

		assert_eq!(
			selector.handle_click(5, 20, &registry, "theme1", false),
			SelectorOutcome::Ignored
		);
	}
}
