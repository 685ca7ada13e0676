use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::{App, Focus};
use crate::components::{Field, FormFocus, SelectorOutcome};
use crate::config::View;

impl App<'_> {
	/// Process a key press.
	pub fn handle_key(&mut self, key: KeyEvent) {
		if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
			self.should_quit = true;
			return;
		}

		if self.selector.is_open() || self.focus == Focus::Selector {
			let loading = self.store.is_loading();
			let outcome = self.selector.handle_key(
				key,
				self.store.registry(),
				self.store.current_id(),
				loading,
			);
			match outcome {
				SelectorOutcome::Selected(id) => {
					self.request_theme(&id);
					return;
				}
				SelectorOutcome::Consumed | SelectorOutcome::Dismissed => return,
				SelectorOutcome::Ignored => {}
			}
		}

		match key.code {
			KeyCode::Tab => return self.cycle_focus(true),
			KeyCode::BackTab => return self.cycle_focus(false),
			_ => {}
		}

		match self.focus {
			Focus::Form(FormFocus::Field(field)) => return self.handle_field_key(field, key),
			Focus::Form(FormFocus::Submit)
				if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) =>
			{
				self.contact.submit();
				return;
			}
			_ => {}
		}

		match key.code {
			KeyCode::Char('q') => self.should_quit = true,
			KeyCode::Char('t') => {
				self.focus = Focus::Selector;
				if !self.store.is_loading() {
					self.selector.open(self.store.registry(), self.store.current_id());
				}
			}
			KeyCode::Char(ch) if View::from_shortcut(ch).is_some() => {
				if let Some(view) = View::from_shortcut(ch) {
					self.set_view(view);
				}
			}
			_ if self.focus == Focus::Content => match self.view {
				View::Home => {
					self.catalog.handle_key(key);
				}
				View::About => {
					self.about.handle_key(key);
				}
				View::Contact => {}
			},
			_ => {}
		}
	}

	fn handle_field_key(&mut self, field: Field, key: KeyEvent) {
		match key.code {
			// Enter on a single-line input advances like Tab does.
			KeyCode::Enter if field != Field::Message => self.cycle_focus(true),
			KeyCode::Esc => self.focus = Focus::Selector,
			_ => {
				self.contact.input(field, key);
			}
		}
	}

	/// Process a mouse event.
	pub fn handle_mouse(&mut self, mouse: MouseEvent) {
		// The switching overlay blocks the page underneath.
		if self.store.is_loading() {
			return;
		}

		match mouse.kind {
			MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
			MouseEventKind::ScrollDown => self.scroll_view(1),
			MouseEventKind::ScrollUp => self.scroll_view(-1),
			_ => {}
		}
	}

	fn handle_click(&mut self, column: u16, row: u16) {
		let outcome = self.selector.handle_click(
			column,
			row,
			self.store.registry(),
			self.store.current_id(),
			false,
		);
		match outcome {
			SelectorOutcome::Selected(id) => return self.request_theme(&id),
			SelectorOutcome::Consumed => {
				self.focus = Focus::Selector;
				return;
			}
			SelectorOutcome::Dismissed | SelectorOutcome::Ignored => {}
		}

		if let Some(view) = self.nav.view_at(column, row) {
			return self.set_view(view);
		}

		match self.view {
			View::Home => {
				if self.catalog.handle_click(column, row) {
					self.focus = Focus::Content;
				}
			}
			View::About => {}
			View::Contact => {
				if let Some(field) = self.contact.field_at(column, row) {
					self.focus = Focus::Form(FormFocus::Field(field));
				} else if self.contact.submit_hit(column, row) {
					self.focus = Focus::Form(FormFocus::Submit);
					self.contact.submit();
				}
			}
		}
	}

	fn scroll_view(&mut self, delta: isize) {
		match self.view {
			View::Home => self.catalog.scroll_by(delta),
			View::About => self.about.scroll_by(delta * 3),
			View::Contact => {}
		}
	}
}
