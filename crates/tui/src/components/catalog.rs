//! Home view: hero copy and the product catalogue.
//!
//! The view fetches on mount through a [`CatalogRuntime`]. Results are only
//! applied when they answer the request the view still cares about, so a
//! result that lands after a retry or after the view was torn down is
//! dropped.

use std::sync::Arc;
use std::sync::mpsc::TryRecvError;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tinted_shop_core::catalog::{
	CatalogRuntime, StarKind, format_price, rating_stars, rating_summary, truncate_text,
};
use tinted_shop_core::{CatalogClient, Product};
use tracing::{debug, error};

use super::scrollbar::{ScrollMetrics, point_in_rect, render_scrollbar};
use crate::style::ShellStyle;

/// Message shown when the catalogue cannot be loaded.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch products. Please try again later.";

const TITLE_CHARS: usize = 60;
const DESCRIPTION_CHARS: usize = 100;
const MIN_CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 10;

/// Lifecycle of the product list.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
	/// Not mounted.
	Idle,
	/// A request is in flight.
	Loading,
	/// Products arrived.
	Loaded(Vec<Product>),
	/// The request failed; carries the user-facing message.
	Failed(String),
}

/// Home view state.
pub struct CatalogView {
	client: Arc<dyn CatalogClient>,
	runtime: Option<CatalogRuntime>,
	limit: usize,
	state: CatalogState,
	scroll: usize,
	max_scroll: usize,
	retry_area: Rect,
}

impl std::fmt::Debug for CatalogView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CatalogView")
			.field("limit", &self.limit)
			.field("state", &self.state)
			.field("scroll", &self.scroll)
			.finish_non_exhaustive()
	}
}

impl CatalogView {
	/// View that requests up to `limit` products from `client`.
	pub fn new(client: Arc<dyn CatalogClient>, limit: usize) -> Self {
		Self {
			client,
			runtime: None,
			limit,
			state: CatalogState::Idle,
			scroll: 0,
			max_scroll: 0,
			retry_area: Rect::default(),
		}
	}

	/// Current lifecycle state.
	#[must_use]
	pub fn state(&self) -> &CatalogState {
		&self.state
	}

	/// Products, if loaded.
	#[must_use]
	pub fn products(&self) -> &[Product] {
		match &self.state {
			CatalogState::Loaded(products) => products,
			_ => &[],
		}
	}

	/// Issue the initial request unless one already ran.
	pub fn mount(&mut self) {
		if self.state == CatalogState::Idle {
			self.fetch();
		}
	}

	/// Drop the current result and request the products again.
	pub fn retry(&mut self) {
		debug!("retrying catalog fetch");
		self.fetch();
	}

	/// Forget everything; late results for the old request are discarded.
	pub fn teardown(&mut self) {
		if let Some(runtime) = self.runtime.as_mut() {
			runtime.cancel();
		}
		self.state = CatalogState::Idle;
		self.scroll = 0;
	}

	fn fetch(&mut self) {
		if self.runtime.is_none() {
			match CatalogRuntime::new(Arc::clone(&self.client)) {
				Ok(runtime) => self.runtime = Some(runtime),
				Err(err) => {
					error!(error = %err, "failed to start catalog worker");
					self.state = CatalogState::Failed(FETCH_ERROR_MESSAGE.to_string());
					return;
				}
			}
		}
		let Some(runtime) = self.runtime.as_mut() else {
			return;
		};
		runtime.cancel();
		self.scroll = 0;
		match runtime.request(self.limit) {
			Ok(_) => self.state = CatalogState::Loading,
			Err(_) => self.worker_lost(),
		}
	}

	/// The worker thread is gone; fail the view and respawn on the next retry.
	fn worker_lost(&mut self) {
		error!("catalog worker stopped unexpectedly");
		self.runtime = None;
		self.state = CatalogState::Failed(FETCH_ERROR_MESSAGE.to_string());
	}

	/// Apply finished requests. Returns `true` when the state changed.
	pub fn pump(&mut self) -> bool {
		let Some(runtime) = self.runtime.as_mut() else {
			return false;
		};

		let mut changed = false;
		loop {
			let result = match runtime.try_recv() {
				Ok(result) => result,
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					if runtime.is_pending() {
						self.worker_lost();
						changed = true;
					} else {
						self.runtime = None;
					}
					break;
				}
			};
			if !runtime.accept(result.id) {
				debug!(request = result.id, "discarding stale catalog result");
				continue;
			}
			self.state = match result.outcome {
				Ok(products) => {
					debug!(count = products.len(), "catalog loaded");
					CatalogState::Loaded(products)
				}
				Err(err) => {
					error!(error = %err, "error fetching products");
					CatalogState::Failed(FETCH_ERROR_MESSAGE.to_string())
				}
			};
			changed = true;
		}
		changed
	}

	/// Scroll with the arrow keys; `r` retries after a failure.
	pub fn handle_key(&mut self, key: KeyEvent) -> bool {
		match key.code {
			KeyCode::Up => {
				self.scroll = self.scroll.saturating_sub(1);
				true
			}
			KeyCode::Down => {
				self.scroll = (self.scroll + 1).min(self.max_scroll);
				true
			}
			KeyCode::Char('r') if matches!(self.state, CatalogState::Failed(_)) => {
				self.retry();
				true
			}
			_ => false,
		}
	}

	/// Scroll by `delta` card rows.
	pub fn scroll_by(&mut self, delta: isize) {
		self.scroll = self
			.scroll
			.saturating_add_signed(delta)
			.min(self.max_scroll);
	}

	/// Handle a click; returns `true` when it hit the retry button.
	pub fn handle_click(&mut self, column: u16, row: u16) -> bool {
		if matches!(self.state, CatalogState::Failed(_))
			&& point_in_rect(column, row, self.retry_area)
		{
			self.retry();
			return true;
		}
		false
	}

	/// Draw hero copy and the catalogue section into `area`.
	pub fn render(&mut self, frame: &mut Frame, area: Rect, style: &ShellStyle, spinner: Span<'_>) {
		let [hero, products] =
			Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);
		render_hero(frame, hero, style);

		self.retry_area = Rect::default();
		let block = Block::default()
			.borders(Borders::TOP)
			.border_style(style.palette.border())
			.title(Span::styled(" Featured Products ", style.heading()));
		let inner = block.inner(products);
		frame.render_widget(block, products);

		match &self.state {
			CatalogState::Idle => {}
			CatalogState::Loading => {
				let line = Line::from(vec![spinner, Span::styled("Loading products...", style.body())]);
				frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), inner);
			}
			CatalogState::Failed(message) => {
				let [text, button] =
					Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).areas(inner);
				frame.render_widget(
					Paragraph::new(message.as_str())
						.style(style.palette.muted())
						.alignment(Alignment::Center),
					text,
				);
				let label = " Try Again (r) ";
				let width = (label.len() as u16).min(button.width);
				self.retry_area = Rect {
					x: button.x + button.width.saturating_sub(width) / 2,
					width,
					..button
				};
				frame.render_widget(Span::styled(label, style.palette.button()), self.retry_area);
			}
			CatalogState::Loaded(products) => {
				let columns = grid_columns(inner.width, style.metrics.card_gap);
				let rows = products.len().div_ceil(columns);
				let visible = usize::from((inner.height / CARD_HEIGHT).max(1));
				let metrics = ScrollMetrics::compute(rows, visible);
				self.max_scroll = metrics.max_offset;
				self.scroll = metrics.clamp(self.scroll);
				let grid = render_scrollbar(frame, inner, metrics, self.scroll, &style.palette);
				render_grid(frame, grid, products, columns, self.scroll, style);
			}
		}
	}
}

fn render_hero(frame: &mut Frame, area: Rect, style: &ShellStyle) {
	let text = Text::from(vec![
		Line::styled("Welcome to Multi-Theme Switcher", style.heading()),
		Line::default(),
		Line::styled(
			"Experience different themes with dynamic layouts, fonts, and colors. \
			 Try switching between themes using the selector in the header!",
			style.body(),
		),
	]);
	frame.render_widget(
		Paragraph::new(text)
			.alignment(Alignment::Center)
			.wrap(Wrap { trim: true }),
		area,
	);
}

fn grid_columns(width: u16, gap: u16) -> usize {
	usize::from(((width + gap) / (MIN_CARD_WIDTH + gap)).max(1))
}

fn render_grid(
	frame: &mut Frame,
	area: Rect,
	products: &[Product],
	columns: usize,
	scroll: usize,
	style: &ShellStyle,
) {
	let gap = style.metrics.card_gap;
	let rows = usize::from(area.height / CARD_HEIGHT);
	let constraints = vec![Constraint::Fill(1); columns];

	for (row_index, row) in products.chunks(columns).skip(scroll).take(rows.max(1)).enumerate() {
		let y = area.y + row_index as u16 * CARD_HEIGHT;
		let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
		if height == 0 {
			break;
		}
		let row_area = Rect { y, height, ..area };
		let cells = Layout::horizontal(constraints.clone())
			.spacing(gap)
			.split(row_area);
		for (product, cell) in row.iter().zip(cells.iter()) {
			render_card(frame, *cell, product, style);
		}
	}
}

fn render_card(frame: &mut Frame, area: Rect, product: &Product, style: &ShellStyle) {
	let mut rating = Vec::with_capacity(7);
	for star in rating_stars(product.rating.rate) {
		let star_style = match star {
			StarKind::Full => style.palette.accent(),
			StarKind::Half => style.palette.accent().add_modifier(Modifier::DIM),
			StarKind::Empty => style.palette.muted(),
		};
		rating.push(Span::styled(star.symbol(), star_style));
	}
	rating.push(Span::raw(" "));
	rating.push(Span::styled(rating_summary(&product.rating), style.palette.muted()));

	let text = Text::from(vec![
		Line::styled(truncate_text(&product.title, TITLE_CHARS), style.heading()),
		Line::styled(format!("[{}]", product.category), style.palette.accent()),
		Line::styled(
			truncate_text(&product.description, DESCRIPTION_CHARS),
			style.body(),
		),
		Line::from(rating),
		Line::styled(
			format_price(product.price),
			style.palette.primary().add_modifier(Modifier::BOLD),
		),
	]);

	let block = style.panel(Line::default());
	frame.render_widget(
		Paragraph::new(text)
			.block(block)
			.wrap(Wrap { trim: true }),
		area,
	);
}

#[cfg(test)]
mod tests {
	use std::collections::VecDeque;
	use std::sync::Mutex;
	use std::sync::atomic::{AtomicBool, Ordering};
	use std::thread;
	use std::time::{Duration, Instant};

	use ratatui::Terminal;
	use ratatui::backend::TestBackend;
	use tinted_shop_core::catalog::Rating;
	use tinted_shop_core::{CatalogError, StyleDocument};

	use super::*;

	struct ScriptedClient {
		responses: Mutex<VecDeque<Result<Vec<Product>, CatalogError>>>,
		calls: Mutex<Vec<usize>>,
	}

	impl ScriptedClient {
		fn new(responses: Vec<Result<Vec<Product>, CatalogError>>) -> Arc<Self> {
			Arc::new(Self {
				responses: Mutex::new(responses.into()),
				calls: Mutex::new(Vec::new()),
			})
		}
	}

	impl CatalogClient for ScriptedClient {
		fn products(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
			self.calls.lock().unwrap().push(limit);
			self.responses
				.lock()
				.unwrap()
				.pop_front()
				.unwrap_or_else(|| Ok(Vec::new()))
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

	fn product(id: u64) -> Product {
		Product {
			id,
			title: format!("Product {id}"),
			price: 1234.5,
			description: "A thing worth buying".into(),
			category: "electronics".into(),
			image: String::new(),
			rating: Rating {
				rate: 4.1,
				count: 259,
			},
		}
	}

	fn settle(view: &mut CatalogView) {
		let deadline = Instant::now() + Duration::from_secs(2);
		while !view.pump() {
			assert!(Instant::now() < deadline, "catalog never settled");
			thread::sleep(Duration::from_millis(5));
		}
	}

	fn style() -> ShellStyle {
		ShellStyle::from_document(&StyleDocument::new())
	}

	#[test]
	fn server_error_fails_then_retry_loads() {
		let client = ScriptedClient::new(vec![
			Err(CatalogError::Status { status: 500 }),
			Ok(vec![product(1), product(2)]),
		]);
		let mut view = CatalogView::new(client.clone(), 6);

		view.mount();
		assert_eq!(view.state(), &CatalogState::Loading);
		settle(&mut view);
		assert_eq!(
			view.state(),
			&CatalogState::Failed(FETCH_ERROR_MESSAGE.to_string())
		);
		assert!(view.products().is_empty());

		view.retry();
		assert_eq!(view.state(), &CatalogState::Loading);
		settle(&mut view);
		assert_eq!(view.products().len(), 2);
		assert_eq!(client.calls.lock().unwrap().as_slice(), &[6, 6]);
	}

	#[test]
	fn results_after_teardown_are_dropped() {
		let client = ScriptedClient::new(vec![Ok(vec![product(1)])]);
		let mut view = CatalogView::new(client, 6);
		view.mount();
		view.teardown();

		thread::sleep(Duration::from_millis(100));
		assert!(!view.pump());
		assert_eq!(view.state(), &CatalogState::Idle);
	}

	/// Takes the worker thread down on its first request.
	struct CrashOnceClient {
		crashed: AtomicBool,
	}

	impl CatalogClient for CrashOnceClient {
		fn products(&self, _limit: usize) -> Result<Vec<Product>, CatalogError> {
			if !self.crashed.swap(true, Ordering::SeqCst) {
				panic!("catalog worker crashed");
			}
			Ok(vec![product(7)])
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

	#[test]
	fn dead_worker_fails_and_retry_respawns_it() {
		let client = Arc::new(CrashOnceClient {
			crashed: AtomicBool::new(false),
		});
		let mut view = CatalogView::new(client, 6);

		view.mount();
		settle(&mut view);
		assert_eq!(
			view.state(),
			&CatalogState::Failed(FETCH_ERROR_MESSAGE.to_string())
		);

		view.retry();
		assert_eq!(view.state(), &CatalogState::Loading);
		settle(&mut view);
		assert_eq!(view.products().len(), 1);
	}

	#[test]
	fn mount_fetches_once() {
		let client = ScriptedClient::new(vec![Ok(vec![product(1)])]);
		let mut view = CatalogView::new(client.clone(), 3);
		view.mount();
		settle(&mut view);
		view.mount();
		assert_eq!(client.calls.lock().unwrap().as_slice(), &[3]);
	}

	#[test]
	fn r_key_retries_only_after_failure() {
		let client = ScriptedClient::new(vec![Ok(vec![product(1)])]);
		let mut view = CatalogView::new(client, 6);
		view.mount();
		settle(&mut view);
		assert!(!view.handle_key(KeyEvent::from(KeyCode::Char('r'))));
	}

	#[test]
	fn cards_show_price_and_rating() {
		let client = ScriptedClient::new(vec![Ok(vec![product(1)])]);
		let mut view = CatalogView::new(client, 6);
		view.mount();
		settle(&mut view);

		let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
		terminal
			.draw(|frame| view.render(frame, frame.area(), &style(), Span::raw("")))
			.unwrap();
		let rendered = format!("{:?}", terminal.backend().buffer());
		assert!(rendered.contains("$1,234.50"));
		assert!(rendered.contains("4.1 (259 reviews)"));
		assert!(rendered.contains("[electronics]"));
	}

	#[test]
	fn failure_renders_message_and_retry_button() {
		let client = ScriptedClient::new(vec![Err(CatalogError::Status { status: 500 })]);
		let mut view = CatalogView::new(client, 6);
		view.mount();
		settle(&mut view);

		let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
		terminal
			.draw(|frame| view.render(frame, frame.area(), &style(), Span::raw("")))
			.unwrap();
		let rendered = format!("{:?}", terminal.backend().buffer());
		assert!(rendered.contains(FETCH_ERROR_MESSAGE));
		assert!(rendered.contains("Try Again"));
	}
}
