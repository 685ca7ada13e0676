//! Core state container for the shell.

use std::sync::Arc;
use std::time::Instant;

use throbber_widgets_tui::ThrobberState;
use tinted_shop_core::{CatalogClient, StyleDocument, ThemeStore};
use tracing::{debug, info};

use crate::components::{AboutView, CatalogView, ContactForm, Field, FormFocus, NavTargets};
use crate::components::{CatalogState, Submitter, ThemeSelector, shows_sidebar};
use crate::config::{ShellOptions, View};
use crate::style::ShellStyle;

/// Target of keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
	/// The theme selector in the header.
	Selector,
	/// The scrollable body of the home or about view.
	Content,
	/// Part of the contact form.
	Form(FormFocus),
}

/// Aggregate state of the terminal shell.
pub struct App<'a> {
	pub(crate) store: ThemeStore<StyleDocument>,
	pub(crate) options: ShellOptions,
	pub(crate) view: View,
	pub(crate) focus: Focus,
	pub(crate) selector: ThemeSelector,
	pub(crate) catalog: CatalogView,
	pub(crate) about: AboutView,
	pub(crate) contact: ContactForm<'a>,
	pub(crate) nav: NavTargets,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) should_quit: bool,
}

impl std::fmt::Debug for App<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("App")
			.field("store", &self.store)
			.field("view", &self.view)
			.field("focus", &self.focus)
			.field("catalog", &self.catalog)
			.field("contact", &self.contact)
			.finish_non_exhaustive()
	}
}

impl<'a> App<'a> {
	/// Build the shell around an initialised store and mount the home view.
	pub fn new(
		store: ThemeStore<StyleDocument>,
		catalog: Arc<dyn CatalogClient>,
		submitter: Box<dyn Submitter>,
		options: ShellOptions,
	) -> Self {
		let mut app = Self {
			catalog: CatalogView::new(catalog, options.product_limit),
			contact: ContactForm::new(submitter, options.submit_delay),
			store,
			options,
			view: View::Home,
			focus: Focus::Content,
			selector: ThemeSelector::default(),
			about: AboutView::default(),
			nav: NavTargets::default(),
			throbber_state: ThrobberState::default(),
			should_quit: false,
		};
		app.catalog.mount();
		app
	}

	/// Theme store backing the shell.
	#[must_use]
	pub fn store(&self) -> &ThemeStore<StyleDocument> {
		&self.store
	}

	/// View in the content column.
	#[must_use]
	pub fn view(&self) -> View {
		self.view
	}

	/// Home view state.
	#[must_use]
	pub fn catalog(&self) -> &CatalogView {
		&self.catalog
	}

	/// Contact form state.
	#[must_use]
	pub fn contact(&self) -> &ContactForm<'a> {
		&self.contact
	}

	/// Theme selector state.
	#[must_use]
	pub fn selector(&self) -> &ThemeSelector {
		&self.selector
	}

	/// Whether the user asked to leave.
	#[must_use]
	pub fn should_quit(&self) -> bool {
		self.should_quit
	}

	/// Whether the sidebar is part of the current layout.
	#[must_use]
	pub fn has_sidebar(&self) -> bool {
		shows_sidebar(self.store.current_id(), &self.options.sidebar_theme)
	}

	/// Colours and measurements read from the projected style variables.
	#[must_use]
	pub fn style(&self) -> ShellStyle {
		ShellStyle::from_document(self.store.sink())
	}

	/// Show `view`, mounting and tearing down the catalogue as needed.
	pub fn set_view(&mut self, view: View) {
		if view == self.view {
			return;
		}
		debug!(from = ?self.view, to = ?view, "view change");
		if self.view == View::Home {
			self.catalog.teardown();
		}
		self.view = view;
		self.selector.close();
		self.focus = match view {
			View::Contact => Focus::Form(FormFocus::Field(Field::Name)),
			View::Home | View::About => Focus::Content,
		};
		if view == View::Home {
			self.catalog.mount();
		}
	}

	/// Ask the store to switch themes.
	pub fn request_theme(&mut self, id: &str) {
		info!(theme = id, "theme selected");
		self.store.switch(id);
	}

	/// Advance timers and drain background results; see [`Self::tick_at`].
	pub fn tick(&mut self) -> bool {
		self.tick_at(Instant::now())
	}

	/// Advance every cooperative timer to `now`. Returns `true` when
	/// anything visible changed.
	pub fn tick_at(&mut self, now: Instant) -> bool {
		let theme = self.store.poll_at(now);
		let catalog = self.catalog.pump();
		let contact = self.contact.poll_at(now);
		if self.is_busy() {
			self.throbber_state.calc_next();
		}
		theme || catalog || contact
	}

	fn is_busy(&self) -> bool {
		self.store.is_loading()
			|| matches!(self.catalog.state(), CatalogState::Loading)
			|| self.contact.is_submitting()
	}

	/// Focus targets of the current view in tab order.
	pub(crate) fn focus_ring(&self) -> Vec<Focus> {
		let mut ring = vec![Focus::Selector];
		match self.view {
			View::Home | View::About => ring.push(Focus::Content),
			View::Contact => {
				ring.extend(
					Field::ALL
						.into_iter()
						.map(|field| Focus::Form(FormFocus::Field(field))),
				);
				ring.push(Focus::Form(FormFocus::Submit));
			}
		}
		ring
	}

	/// Move focus to the next or previous entry of the ring.
	pub(crate) fn cycle_focus(&mut self, forward: bool) {
		let ring = self.focus_ring();
		let len = ring.len();
		let current = ring.iter().position(|focus| *focus == self.focus).unwrap_or(0);
		let next = if forward {
			(current + 1) % len
		} else {
			(current + len - 1) % len
		};
		self.focus = ring[next];
		if self.focus != Focus::Selector {
			self.selector.close();
		}
	}
}
