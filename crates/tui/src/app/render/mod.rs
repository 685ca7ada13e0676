use ratatui::Frame;
use ratatui::widgets::Block;
use throbber_widgets_tui::Throbber;

use super::{App, Focus};
use crate::components::shell::{
	render_footer, render_header, render_overlay, render_sidebar, shows_sidebar,
};
use crate::components::{SelectorContext, ShellLayout, ThemeSelector};
use crate::config::View;

impl App<'_> {
	/// Draw the whole shell for the current state.
	pub fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area();
		let style = self.style();
		frame.render_widget(Block::default().style(style.palette.base()), area);

		let sidebar = shows_sidebar(self.store.current_id(), &self.options.sidebar_theme);
		let layout = ShellLayout::compute(area, &style, sidebar);
		let loading = self.store.is_loading();

		self.nav.clear();
		let selector_area = render_header(
			frame,
			layout.header,
			&self.options.app_name,
			self.view,
			ThemeSelector::toggle_width(self.store.registry()),
			&style,
			&mut self.nav,
		);

		let selector_ctx = SelectorContext {
			registry: self.store.registry(),
			active_id: self.store.current_id(),
			focused: self.focus == Focus::Selector,
			disabled: loading,
			style: &style,
		};
		self.selector.render_toggle(frame, selector_area, &selector_ctx);

		if let Some(sidebar_area) = layout.sidebar {
			render_sidebar(
				frame,
				sidebar_area,
				self.store.config(),
				self.view,
				&style,
				&mut self.nav,
			);
		}

		match self.view {
			View::Home => {
				let spinner = Throbber::default()
					.throbber_style(style.palette.accent())
					.to_symbol_span(&self.throbber_state);
				self.catalog.render(frame, layout.content, &style, spinner);
			}
			View::About => self.about.render(frame, layout.content, &style),
			View::Contact => {
				let focus = match self.focus {
					Focus::Form(focus) => Some(focus),
					Focus::Selector | Focus::Content => None,
				};
				self.contact.render(frame, layout.content, focus, &style);
			}
		}

		render_footer(frame, layout.footer, &self.options.app_name, &style);
		self.selector.render_menu(frame, area, &selector_ctx);

		if loading {
			render_overlay(frame, area, &style, &self.throbber_state);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::{Duration, Instant};

	use ratatui::Terminal;
	use ratatui::backend::TestBackend;
	use ratatui::crossterm::event::{
		KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
	};
	use tinted_shop_core::{
		CatalogClient, CatalogError, MemoryStorage, Product, StyleDocument, SwitchTimings,
		THEME_STORAGE_KEY, ThemeRegistry, ThemeStore,
	};

	use super::*;
	use crate::components::{Field, SimulatedSubmitter};
	use crate::config::ShellOptions;

	struct EmptyCatalog;

	impl CatalogClient for EmptyCatalog {
		fn products(&self, _limit: usize) -> Result<Vec<Product>, CatalogError> {
			Ok(Vec::new())
		}

		fn product(&self, _id: u64) -> Result<Product, CatalogError> {
			Err(CatalogError::Status { status: 404 })
		}

		fn products_in_category(&self, _category: &str) -> Result<Vec<Product>, CatalogError> {
			Ok(Vec::new())
		}

		fn categories(&self) -> Result<Vec<String>, CatalogError> {
			Ok(Vec::new())
		}
	}

	fn app_at(theme: Option<&str>, now: Instant) -> App<'static> {
		let storage = match theme {
			Some(id) => MemoryStorage::with_entry(THEME_STORAGE_KEY, &format!("\"{id}\"")),
			None => MemoryStorage::new(),
		};
		let store = ThemeStore::initialize_at(
			Arc::new(ThemeRegistry::builtin()),
			Box::new(storage),
			StyleDocument::new(),
			SwitchTimings::default(),
			now,
		);
		App::new(
			store,
			Arc::new(EmptyCatalog),
			Box::new(SimulatedSubmitter),
			ShellOptions::default(),
		)
	}

	fn render(app: &mut App<'_>) -> String {
		let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
		terminal.draw(|frame| app.draw(frame)).unwrap();
		format!("{:?}", terminal.backend().buffer())
	}

	fn press(app: &mut App<'_>, code: KeyCode) {
		app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
	}

	#[test]
	fn sidebar_only_renders_for_the_sidebar_theme() {
		let start = Instant::now();
		let settled = start + Duration::from_millis(200);

		for (theme, expected) in [("theme1", false), ("theme2", true), ("theme3", false)] {
			let mut app = app_at(Some(theme), start);
			app.tick_at(settled);
			let rendered = render(&mut app);
			assert_eq!(app.has_sidebar(), expected, "{theme}");
			assert_eq!(rendered.contains("Quick Stats"), expected, "{theme}");
		}
	}

	#[test]
	fn overlay_shows_while_switching() {
		let start = Instant::now();
		let mut app = app_at(None, start);
		assert!(render(&mut app).contains("Switching theme..."));

		app.tick_at(start + Duration::from_millis(150));
		assert!(!render(&mut app).contains("Switching theme..."));

		app.store.switch_at("theme3", start + Duration::from_millis(200));
		assert!(render(&mut app).contains("Switching theme..."));
		app.tick_at(start + Duration::from_millis(300));
		assert_eq!(app.store().current_id(), "theme3");
		assert!(!render(&mut app).contains("Switching theme..."));
	}

	#[test]
	fn keyboard_selection_switches_theme() {
		let start = Instant::now();
		let mut app = app_at(None, start);
		app.tick_at(start + Duration::from_millis(150));

		press(&mut app, KeyCode::Char('t'));
		assert!(app.selector().is_open());
		press(&mut app, KeyCode::Down);
		press(&mut app, KeyCode::Enter);
		assert!(!app.selector().is_open());
		assert!(app.store().is_loading());

		// Input is ignored until the switch lands.
		press(&mut app, KeyCode::Enter);
		assert!(!app.selector().is_open());

		app.tick_at(Instant::now() + Duration::from_millis(150));
		assert_eq!(app.store().current_id(), "theme2");
		assert!(app.has_sidebar());
	}

	#[test]
	fn clicking_outside_the_menu_closes_it() {
		let start = Instant::now();
		let mut app = app_at(None, start);
		app.tick_at(start + Duration::from_millis(150));
		render(&mut app);

		press(&mut app, KeyCode::Char('t'));
		assert!(app.selector().is_open());
		render(&mut app);

		app.handle_mouse(MouseEvent {
			kind: MouseEventKind::Down(MouseButton::Left),
			column: 5,
			row: 30,
			modifiers: KeyModifiers::NONE,
		});
		assert!(!app.selector().is_open());
		assert_eq!(app.store().current_id(), "theme1");
	}

	#[test]
	fn digits_and_tab_navigate() {
		let start = Instant::now();
		let mut app = app_at(None, start);
		app.tick_at(start + Duration::from_millis(150));

		press(&mut app, KeyCode::Char('3'));
		assert_eq!(app.view(), View::Contact);
		assert!(render(&mut app).contains("Send Message"));

		// Digits typed into a field stay in the field.
		press(&mut app, KeyCode::Char('2'));
		assert_eq!(app.view(), View::Contact);
		assert_eq!(app.contact().value(Field::Name), "2");

		press(&mut app, KeyCode::BackTab);
		press(&mut app, KeyCode::Char('2'));
		assert_eq!(app.view(), View::About);
		assert!(render(&mut app).contains("Key Features"));

		press(&mut app, KeyCode::Char('q'));
		assert!(app.should_quit());
	}
}
