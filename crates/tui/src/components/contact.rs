//! Contact page: a four-field form with a simulated submit.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use tracing::{info, warn};
use tui_textarea::TextArea;

use super::scrollbar::point_in_rect;
use crate::style::ShellStyle;

const SUCCESS_MESSAGE: &str = "Thank you for your message! We'll get back to you soon.";
const ERROR_MESSAGE: &str = "Sorry, there was an error sending your message. Please try again.";

/// Form inputs in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
	/// Sender name.
	Name,
	/// Reply address.
	Email,
	/// Subject line.
	Subject,
	/// Multi-line body.
	Message,
}

impl Field {
	/// Every field in tab order.
	pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

	fn index(self) -> usize {
		self as usize
	}

	fn label(self) -> &'static str {
		match self {
			Self::Name => "Name *",
			Self::Email => "Email *",
			Self::Subject => "Subject *",
			Self::Message => "Message *",
		}
	}
}

/// A filled-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
	/// Sender name.
	pub name: String,
	/// Reply address.
	pub email: String,
	/// Subject line.
	pub subject: String,
	/// Body.
	pub message: String,
}

/// Delivers contact messages.
pub trait Submitter: Send {
	/// Deliver `message`.
	fn submit(&mut self, message: &ContactMessage) -> Result<()>;
}

/// Accepts every message and only records it in the log.
#[derive(Debug, Default)]
pub struct SimulatedSubmitter;

impl Submitter for SimulatedSubmitter {
	fn submit(&mut self, message: &ContactMessage) -> Result<()> {
		info!(subject = %message.subject, "contact message accepted");
		Ok(())
	}
}

/// Banner shown under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
	/// Nothing to report.
	#[default]
	Idle,
	/// The last message went through.
	Success,
	/// The last message failed; the input was kept.
	Error,
}

/// Where keyboard focus sits inside the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
	/// A text input.
	Field(Field),
	/// The send button.
	Submit,
}

/// Contact form state.
pub struct ContactForm<'a> {
	fields: [TextArea<'a>; 4],
	submitter: Box<dyn Submitter>,
	delay: Duration,
	due: Option<Instant>,
	status: SubmitStatus,
	field_areas: [Rect; 4],
	submit_area: Rect,
}

impl std::fmt::Debug for ContactForm<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContactForm")
			.field("status", &self.status)
			.field("submitting", &self.is_submitting())
			.finish_non_exhaustive()
	}
}

impl<'a> ContactForm<'a> {
	/// Empty form that hands messages to `submitter` after `delay`.
	pub fn new(submitter: Box<dyn Submitter>, delay: Duration) -> Self {
		Self {
			fields: Default::default(),
			submitter,
			delay,
			due: None,
			status: SubmitStatus::Idle,
			field_areas: [Rect::default(); 4],
			submit_area: Rect::default(),
		}
	}

	/// Text currently in `field`.
	#[must_use]
	pub fn value(&self, field: Field) -> String {
		self.fields[field.index()].lines().join("\n")
	}

	/// Whether every field has content.
	#[must_use]
	pub fn is_valid(&self) -> bool {
		Field::ALL
			.into_iter()
			.all(|field| self.fields[field.index()].lines().iter().any(|line| !line.is_empty()))
	}

	/// Whether a submission is waiting on its delay.
	#[must_use]
	pub fn is_submitting(&self) -> bool {
		self.due.is_some()
	}

	/// Outcome of the last submission.
	#[must_use]
	pub fn status(&self) -> SubmitStatus {
		self.status
	}

	/// Feed a key to `field`. Inputs are read-only while submitting.
	pub fn input(&mut self, field: Field, key: KeyEvent) -> bool {
		if self.is_submitting() {
			return false;
		}
		// Single-line inputs have no use for newlines.
		if key.code == KeyCode::Enter && field != Field::Message {
			return false;
		}
		self.fields[field.index()].input(key)
	}

	/// Start submitting; see [`Self::submit_at`].
	pub fn submit(&mut self) -> bool {
		self.submit_at(Instant::now())
	}

	/// Start submitting at `now` if the form is complete and idle.
	pub fn submit_at(&mut self, now: Instant) -> bool {
		if !self.is_valid() || self.is_submitting() {
			return false;
		}
		self.status = SubmitStatus::Idle;
		self.due = Some(now + self.delay);
		true
	}

	/// Finish the submission; see [`Self::poll_at`].
	pub fn poll(&mut self) -> bool {
		self.poll_at(Instant::now())
	}

	/// Deliver the message once the delay has passed. Returns `true` when
	/// the status changed.
	pub fn poll_at(&mut self, now: Instant) -> bool {
		match self.due {
			Some(due) if due <= now => {}
			_ => return false,
		}
		self.due = None;

		let message = ContactMessage {
			name: self.value(Field::Name),
			email: self.value(Field::Email),
			subject: self.value(Field::Subject),
			message: self.value(Field::Message),
		};
		match self.submitter.submit(&message) {
			Ok(()) => {
				self.fields = Default::default();
				self.status = SubmitStatus::Success;
			}
			Err(err) => {
				warn!(error = %err, "contact message failed");
				self.status = SubmitStatus::Error;
			}
		}
		true
	}

	/// Field under (`column`, `row`) in the last frame.
	#[must_use]
	pub fn field_at(&self, column: u16, row: u16) -> Option<Field> {
		Field::ALL
			.into_iter()
			.find(|field| point_in_rect(column, row, self.field_areas[field.index()]))
	}

	/// Whether (`column`, `row`) hit the send button in the last frame.
	#[must_use]
	pub fn submit_hit(&self, column: u16, row: u16) -> bool {
		point_in_rect(column, row, self.submit_area)
	}

	/// Draw the contact page into `area`.
	pub fn render(
		&mut self,
		frame: &mut Frame,
		area: Rect,
		focus: Option<FormFocus>,
		style: &ShellStyle,
	) {
		let (info, form) = if area.width >= 80 {
			let [info, form] =
				Layout::horizontal([Constraint::Length(34), Constraint::Min(0)])
					.spacing(style.metrics.card_gap)
					.areas(area);
			(info, form)
		} else {
			let [form, info] =
				Layout::vertical([Constraint::Min(16), Constraint::Length(12)]).areas(area);
			(info, form)
		};

		render_info(frame, info, style);
		self.render_form(frame, form, focus, style);
	}

	fn render_form(
		&mut self,
		frame: &mut Frame,
		area: Rect,
		focus: Option<FormFocus>,
		style: &ShellStyle,
	) {
		let block = style.panel(" Send us a Message ");
		let inner = block.inner(area);
		frame.render_widget(block, area);

		let [name, email, subject, message, submit, banner] = Layout::vertical([
			Constraint::Length(3),
			Constraint::Length(3),
			Constraint::Length(3),
			Constraint::Min(4),
			Constraint::Length(1),
			Constraint::Length(2),
		])
		.areas(inner);

		let submitting = self.is_submitting();
		for (field, field_area) in Field::ALL.into_iter().zip([name, email, subject, message]) {
			let focused = focus == Some(FormFocus::Field(field));
			let textarea = &mut self.fields[field.index()];
			let border = if focused {
				style.palette.accent()
			} else {
				style.palette.border()
			};
			let mut block = style.panel(field.label()).border_style(border);
			if submitting {
				block = block.style(style.disabled());
			}
			textarea.set_block(block);
			textarea.set_cursor_line_style(Style::new());
			textarea.set_cursor_style(if focused && !submitting {
				style.palette.selection()
			} else {
				style.body()
			});
			self.field_areas[field.index()] = field_area;
			frame.render_widget(&*textarea, field_area);
		}

		let label = if submitting { " Sending... " } else { " Send Message " };
		let button_style = if !self.is_valid() || submitting {
			style.disabled()
		} else if focus == Some(FormFocus::Submit) {
			style.palette.selection().add_modifier(Modifier::BOLD)
		} else {
			style.palette.button()
		};
		self.submit_area = Rect {
			width: (label.len() as u16).min(submit.width),
			..submit
		};
		frame.render_widget(Span::styled(label, button_style), self.submit_area);

		let banner_text = match self.status {
			SubmitStatus::Idle => None,
			SubmitStatus::Success => Some((SUCCESS_MESSAGE, style.palette.accent())),
			SubmitStatus::Error => Some((ERROR_MESSAGE, style.palette.primary())),
		};
		if let Some((text, banner_style)) = banner_text {
			frame.render_widget(
				Paragraph::new(text)
					.style(banner_style)
					.wrap(Wrap { trim: true }),
				banner,
			);
		}
	}
}

fn render_info(frame: &mut Frame, area: Rect, style: &ShellStyle) {
	let entry = |label: &'static str, lines: &[&'static str]| {
		let mut out = vec![Line::styled(label, style.palette.primary())];
		out.extend(lines.iter().map(|line| Line::styled(*line, style.body())));
		out.push(Line::default());
		out
	};

	let mut lines = vec![
		Line::styled("Contact Us", style.heading()),
		Line::styled(
			"We'd love to hear from you. Send us a message and we'll respond as soon as possible.",
			style.palette.muted(),
		),
		Line::default(),
	];
	lines.extend(entry("Email", &["hello@multithemeswitcher.com"]));
	lines.extend(entry("Phone", &["+1 (555) 123-4567"]));
	lines.extend(entry(
		"Address",
		&["123 Theme Street", "Design City, DC 12345", "United States"],
	));
	lines.extend(entry(
		"Office Hours",
		&[
			"Monday - Friday: 9:00 AM - 6:00 PM",
			"Saturday: 10:00 AM - 4:00 PM",
			"Sunday: Closed",
		],
	));

	frame.render_widget(
		Paragraph::new(Text::from(lines))
			.block(style.panel(" Get in Touch "))
			.wrap(Wrap { trim: true }),
		area,
	);
}
