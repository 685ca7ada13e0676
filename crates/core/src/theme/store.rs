//! Owner of the active theme.
//!
//! The store is the only writer of [`ActiveThemeState`]. Switches are
//! deferred by a short delay so container transitions have time to show; the
//! deferral is modelled as cooperative timers that the caller fires with
//! [`ThemeStore::poll`] once per frame. Each switch receives a sequence
//! number and a firing timer commits only if it carries the latest number,
//! so a superseded request can never overwrite a newer one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::projector::{StyleSink, project};
use super::registry::ThemeRegistry;
use super::types::{ActiveThemeState, ThemeConfig};
use crate::storage::{KeyValueStorage, load_theme_id, save_theme_id};

/// Delays applied by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchTimings {
	/// Time between a switch request and its commit.
	pub switch_delay: Duration,
	/// Time the loading flag stays raised after startup.
	pub settle_delay: Duration,
}

impl Default for SwitchTimings {
	fn default() -> Self {
		Self {
			switch_delay: Duration::from_millis(100),
			settle_delay: Duration::from_millis(150),
		}
	}
}

impl SwitchTimings {
	/// No delays at all; switches commit on the next poll.
	#[must_use]
	pub fn immediate() -> Self {
		Self {
			switch_delay: Duration::ZERO,
			settle_delay: Duration::ZERO,
		}
	}
}

#[derive(Debug)]
struct PendingSwitch {
	seq: u64,
	id: String,
	due: Instant,
}

/// Active theme plus the machinery that changes it.
pub struct ThemeStore<S: StyleSink> {
	registry: Arc<ThemeRegistry>,
	storage: Box<dyn KeyValueStorage>,
	sink: S,
	timings: SwitchTimings,
	current: ThemeConfig,
	loading: bool,
	latest_seq: u64,
	pending: Vec<PendingSwitch>,
	settle_deadline: Option<Instant>,
}

impl<S: StyleSink> std::fmt::Debug for ThemeStore<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ThemeStore")
			.field("current", &self.current.id)
			.field("loading", &self.loading)
			.field("latest_seq", &self.latest_seq)
			.field("pending", &self.pending)
			.finish_non_exhaustive()
	}
}

impl<S: StyleSink> ThemeStore<S> {
	/// Restore the persisted theme and project it into `sink`.
	pub fn initialize(
		registry: Arc<ThemeRegistry>,
		storage: Box<dyn KeyValueStorage>,
		sink: S,
		timings: SwitchTimings,
	) -> Self {
		Self::initialize_at(registry, storage, sink, timings, Instant::now())
	}

	/// [`Self::initialize`] with an explicit clock reading.
	pub fn initialize_at(
		registry: Arc<ThemeRegistry>,
		storage: Box<dyn KeyValueStorage>,
		mut sink: S,
		timings: SwitchTimings,
		now: Instant,
	) -> Self {
		let initial = restore_theme(&registry, storage.as_ref());
		project(&initial, &mut sink);
		info!(theme = %initial.id, "theme restored");

		let settle_deadline = (!timings.settle_delay.is_zero()).then(|| now + timings.settle_delay);

		Self {
			registry,
			storage,
			sink,
			timings,
			current: initial,
			loading: settle_deadline.is_some(),
			latest_seq: 0,
			pending: Vec::new(),
			settle_deadline,
		}
	}

	/// Snapshot of the committed theme and loading flag.
	#[must_use]
	pub fn current(&self) -> ActiveThemeState {
		ActiveThemeState {
			id: self.current.id.clone(),
			config: self.current.clone(),
			loading: self.loading,
		}
	}

	/// Identifier of the committed theme.
	#[must_use]
	pub fn current_id(&self) -> &str {
		&self.current.id
	}

	/// Configuration of the committed theme.
	#[must_use]
	pub fn config(&self) -> &ThemeConfig {
		&self.current
	}

	/// Whether a switch or the startup settle is still pending.
	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.loading
	}

	/// Registry the store resolves identifiers against.
	#[must_use]
	pub fn registry(&self) -> &ThemeRegistry {
		&self.registry
	}

	/// Sink the active theme is projected into.
	#[must_use]
	pub fn sink(&self) -> &S {
		&self.sink
	}

	/// Sequence number of the most recent switch request.
	#[must_use]
	pub fn latest_sequence(&self) -> u64 {
		self.latest_seq
	}

	/// Request a switch to `id`; see [`Self::switch_at`].
	pub fn switch(&mut self, id: &str) -> u64 {
		self.switch_at(id, Instant::now())
	}

	/// Request a switch to `id`, committing once the switch delay elapses.
	///
	/// Returns the sequence number assigned to the request. Any request still
	/// waiting is superseded and will be discarded when its timer fires.
	pub fn switch_at(&mut self, id: &str, now: Instant) -> u64 {
		self.latest_seq += 1;
		let seq = self.latest_seq;
		debug!(theme = id, seq, "theme switch requested");

		self.pending.push(PendingSwitch {
			seq,
			id: id.to_string(),
			due: now + self.timings.switch_delay,
		});
		self.loading = true;
		seq
	}

	/// Fire due timers; see [`Self::poll_at`].
	pub fn poll(&mut self) -> bool {
		self.poll_at(Instant::now())
	}

	/// Fire every timer due at `now`. Returns `true` when visible state
	/// (theme or loading flag) changed.
	pub fn poll_at(&mut self, now: Instant) -> bool {
		let was_loading = self.loading;
		let previous_id = self.current.id.clone();

		if self.settle_deadline.is_some_and(|deadline| deadline <= now) {
			self.settle_deadline = None;
		}

		let mut due = Vec::new();
		self.pending.retain_mut(|pending| {
			if pending.due <= now {
				due.push(PendingSwitch {
					seq: pending.seq,
					id: std::mem::take(&mut pending.id),
					due: pending.due,
				});
				false
			} else {
				true
			}
		});
		due.sort_by_key(|pending| (pending.due, pending.seq));

		for pending in due {
			if pending.seq == self.latest_seq {
				self.commit(&pending.id);
			} else {
				debug!(
					theme = %pending.id,
					seq = pending.seq,
					latest = self.latest_seq,
					"discarding superseded theme switch"
				);
			}
		}

		self.loading = self.settle_deadline.is_some()
			|| self
				.pending
				.iter()
				.any(|pending| pending.seq == self.latest_seq);

		was_loading != self.loading || previous_id != self.current.id
	}

	fn commit(&mut self, id: &str) {
		let config = self.registry.resolve(id).clone();

		if let Err(err) = save_theme_id(self.storage.as_mut(), &config.id) {
			warn!(theme = %config.id, error = %err, "failed to persist theme");
		}

		self.current = config;
		project(&self.current, &mut self.sink);
		info!(theme = %self.current.id, "theme switched");
	}
}

fn restore_theme(registry: &ThemeRegistry, storage: &dyn KeyValueStorage) -> ThemeConfig {
	match load_theme_id(storage) {
		Ok(Some(id)) => match registry.get(&id) {
			Some(theme) => theme.clone(),
			None => {
				debug!(theme = %id, "persisted theme is unknown, using default");
				registry.default_theme().clone()
			}
		},
		Ok(None) => registry.default_theme().clone(),
		Err(err) => {
			warn!(error = %err, "failed to read persisted theme, using default");
			registry.default_theme().clone()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::{MemoryStorage, StorageError, THEME_STORAGE_KEY};
	use crate::theme::projector::StyleDocument;

	struct BrokenStorage;

	impl KeyValueStorage for BrokenStorage {
		fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
			Err(StorageError::Unavailable("disabled".into()))
		}

		fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
			Err(StorageError::Unavailable("disabled".into()))
		}
	}

	fn registry() -> Arc<ThemeRegistry> {
		Arc::new(ThemeRegistry::builtin())
	}

	fn store_with(storage: MemoryStorage, now: Instant) -> ThemeStore<StyleDocument> {
		ThemeStore::initialize_at(
			registry(),
			Box::new(storage),
			StyleDocument::new(),
			SwitchTimings::default(),
			now,
		)
	}

	fn projected(id: &str) -> StyleDocument {
		let registry = ThemeRegistry::builtin();
		let mut document = StyleDocument::new();
		project(registry.get(id).unwrap(), &mut document);
		document
	}

	#[test]
	fn switch_then_current_returns_requested_theme() {
		let start = Instant::now();
		let mut store = store_with(MemoryStorage::new(), start);
		let ids: Vec<String> = store.registry().ids().map(str::to_string).collect();

		let mut now = start;
		for id in ids {
			store.switch_at(&id, now);
			now += Duration::from_millis(100);
			store.poll_at(now);
			let current = store.current();
			assert_eq!(current.id, id);
			assert_eq!(current.config.id, id);
			assert_eq!(store.sink(), &projected(&id));
		}
	}

	#[test]
	fn switch_waits_for_the_delay() {
		let start = Instant::now();
		let mut store = store_with(MemoryStorage::new(), start);
		store.poll_at(start + Duration::from_millis(200));
		assert!(!store.is_loading());

		let t0 = start + Duration::from_millis(200);
		store.switch_at("theme2", t0);
		assert!(store.is_loading());

		assert!(!store.poll_at(t0 + Duration::from_millis(50)));
		assert_eq!(store.current_id(), "theme1");
		assert!(store.is_loading());

		assert!(store.poll_at(t0 + Duration::from_millis(100)));
		assert_eq!(store.current_id(), "theme2");
		assert!(!store.is_loading());
	}

	#[test]
	fn persisted_theme_is_restored_without_switching() {
		let start = Instant::now();
		let storage = MemoryStorage::new();

		let mut first = store_with(storage.clone(), start);
		first.switch_at("theme2", start);
		first.poll_at(start + Duration::from_millis(100));
		drop(first);

		let reloaded = store_with(storage, start);
		assert_eq!(reloaded.current_id(), "theme2");
		assert_eq!(reloaded.latest_sequence(), 0);
		assert_eq!(reloaded.sink(), &projected("theme2"));
	}

	#[test]
	fn invalid_or_missing_persisted_value_falls_back_to_default() {
		let start = Instant::now();
		for raw in ["\"theme9\"", "not json", "42", ""] {
			let storage = MemoryStorage::with_entry(THEME_STORAGE_KEY, raw);
			let store = store_with(storage, start);
			assert_eq!(store.current_id(), "theme1", "raw value {raw:?}");
		}

		let store = store_with(MemoryStorage::new(), start);
		assert_eq!(store.current_id(), "theme1");
	}

	#[test]
	fn startup_projects_before_first_paint_and_settles() {
		let start = Instant::now();
		let storage = MemoryStorage::with_entry(THEME_STORAGE_KEY, "\"theme3\"");
		let mut store = store_with(storage, start);

		assert!(store.is_loading());
		assert_eq!(store.sink().active_theme(), Some("theme3"));

		store.poll_at(start + Duration::from_millis(149));
		assert!(store.is_loading());
		store.poll_at(start + Duration::from_millis(150));
		assert!(!store.is_loading());
	}

	#[test]
	fn overlapping_switches_are_last_write_wins() {
		let start = Instant::now();
		let storage = MemoryStorage::new();
		let mut store = store_with(storage.clone(), start);

		let first = store.switch_at("theme2", start);
		let second = store.switch_at("theme3", start + Duration::from_millis(10));
		assert!(second > first);

		// The first timer fires while the second is still pending.
		store.poll_at(start + Duration::from_millis(100));
		assert_eq!(store.current_id(), "theme1");
		assert!(store.is_loading());
		assert_eq!(storage.peek(THEME_STORAGE_KEY), None);

		store.poll_at(start + Duration::from_millis(110));
		assert_eq!(store.current_id(), "theme3");
		assert_eq!(storage.peek(THEME_STORAGE_KEY).as_deref(), Some("\"theme3\""));
		assert_eq!(store.sink(), &projected("theme3"));

		// Only the startup settle keeps the flag raised now.
		store.poll_at(start + Duration::from_millis(150));
		assert!(!store.is_loading());
	}

	#[test]
	fn overlapping_switches_fired_together_keep_the_latest() {
		let start = Instant::now();
		let mut store = store_with(MemoryStorage::new(), start);
		store.switch_at("theme2", start);
		store.switch_at("theme3", start);

		store.poll_at(start + Duration::from_secs(1));
		assert_eq!(store.current_id(), "theme3");
		assert_eq!(store.sink(), &projected("theme3"));
	}

	#[test]
	fn unknown_switch_target_fails_closed_to_default() {
		let start = Instant::now();
		let mut store = store_with(MemoryStorage::with_entry(THEME_STORAGE_KEY, "\"theme2\""), start);
		store.switch_at("mystery", start);
		store.poll_at(start + Duration::from_millis(100));
		assert_eq!(store.current_id(), "theme1");
		assert_eq!(store.sink(), &projected("theme1"));
	}

	#[test]
	fn broken_storage_never_blocks_switching() {
		let start = Instant::now();
		let mut store = ThemeStore::initialize_at(
			registry(),
			Box::new(BrokenStorage),
			StyleDocument::new(),
			SwitchTimings::immediate(),
			start,
		);
		assert_eq!(store.current_id(), "theme1");
		assert!(!store.is_loading());

		store.switch_at("theme2", start);
		store.poll_at(start);
		assert_eq!(store.current_id(), "theme2");
	}
}
