//! Durable key-value storage for user preferences.
//!
//! Values are opaque strings, the same contract browser local storage offers.
//! Callers serialize structured values (the theme identifier is stored as a
//! JSON string scalar) before handing them over.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

/// Storage key under which the active theme identifier is persisted.
pub const THEME_STORAGE_KEY: &str = "multi-theme-switcher-theme";

/// Failures raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
	/// The backing file could not be read or written.
	#[error("storage file {path} is not accessible")]
	Io {
		/// File that failed.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: io::Error,
	},
	/// The backing file exists but does not hold a JSON object of strings.
	#[error("storage file {path} is corrupted")]
	Corrupt {
		/// File that failed to parse.
		path: PathBuf,
		/// Parse error.
		#[source]
		source: serde_json::Error,
	},
	/// A value could not be encoded or decoded.
	#[error("stored value under `{key}` is not valid JSON")]
	Value {
		/// Key whose value failed.
		key: String,
		/// Parse error.
		#[source]
		source: serde_json::Error,
	},
	/// The backend refused the operation.
	#[error("storage is unavailable: {0}")]
	Unavailable(String),
}

/// Minimal string key-value store.
pub trait KeyValueStorage: Send {
	/// Fetch the raw value stored under `key`.
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
	/// Store `value` under `key`, replacing any previous value.
	fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		(**self).get(key)
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
		(**self).set(key, value)
	}
}

/// JSON file holding a flat object of string values.
#[derive(Debug, Clone)]
pub struct FileStorage {
	path: PathBuf,
}

impl FileStorage {
	/// Storage backed by the file at `path`; the file is created lazily.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Location of the backing file.
	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
		let contents = match fs::read_to_string(&self.path) {
			Ok(contents) => contents,
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
			Err(source) => {
				return Err(StorageError::Io {
					path: self.path.clone(),
					source,
				});
			}
		};

		if contents.trim().is_empty() {
			return Ok(BTreeMap::new());
		}

		serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
			path: self.path.clone(),
			source,
		})
	}

	fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
		let io_err = |source| StorageError::Io {
			path: self.path.clone(),
			source,
		};

		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			fs::create_dir_all(parent).map_err(io_err)?;
		}

		let encoded = serde_json::to_string_pretty(map).map_err(|source| StorageError::Corrupt {
			path: self.path.clone(),
			source,
		})?;

		let staging = self.path.with_extension("json.tmp");
		fs::write(&staging, encoded).map_err(io_err)?;
		fs::rename(&staging, &self.path).map_err(io_err)
	}
}

impl KeyValueStorage for FileStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.read_map()?.get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
		let mut map = match self.read_map() {
			Ok(map) => map,
			Err(StorageError::Corrupt { path, source }) => {
				warn!(path = %path.display(), error = %source, "discarding corrupted storage file");
				BTreeMap::new()
			}
			Err(other) => return Err(other),
		};
		map.insert(key.to_string(), value.to_string());
		self.write_map(&map)
	}
}

/// Process-local storage. Clones share the same backing map, which lets a
/// test simulate a reload by handing a clone to a fresh consumer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
	values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
	/// Empty storage.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Storage pre-populated with a single entry.
	#[must_use]
	pub fn with_entry(key: &str, value: &str) -> Self {
		let storage = Self::new();
		storage
			.values
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(key.to_string(), value.to_string());
		storage
	}

	/// Raw value under `key` without going through the trait.
	#[must_use]
	pub fn peek(&self, key: &str) -> Option<String> {
		self.values
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.get(key)
			.cloned()
	}
}

impl KeyValueStorage for MemoryStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.peek(key))
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
		self.values
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// Read the persisted theme identifier, if one is stored and decodes.
pub fn load_theme_id<S: KeyValueStorage + ?Sized>(
	storage: &S,
) -> Result<Option<String>, StorageError> {
	let Some(raw) = storage.get(THEME_STORAGE_KEY)? else {
		debug!("no persisted theme");
		return Ok(None);
	};

	serde_json::from_str::<String>(&raw)
		.map(Some)
		.map_err(|source| StorageError::Value {
			key: THEME_STORAGE_KEY.to_string(),
			source,
		})
}

/// Persist `id` as a JSON string scalar.
pub fn save_theme_id<S: KeyValueStorage + ?Sized>(
	storage: &mut S,
	id: &str,
) -> Result<(), StorageError> {
	let encoded = serde_json::to_string(id).map_err(|source| StorageError::Value {
		key: THEME_STORAGE_KEY.to_string(),
		source,
	})?;
	storage.set(THEME_STORAGE_KEY, &encoded)
}
