//! Background worker that performs catalogue requests off the UI thread.
//!
//! Every request carries an id. The runtime remembers the id of the request
//! it still cares about; results for any other id are stale and callers drop
//! them. Cancelling (on retry or teardown) simply forgets the current id.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, SendError, Sender, TryRecvError};
use std::thread;

use tracing::debug;

use super::{CatalogClient, CatalogError, Product};

/// Commands sent to the catalogue worker thread.
pub enum CatalogCommand {
	/// Fetch a bounded page of products.
	Fetch {
		/// Request id echoed back in the result.
		id: u64,
		/// Maximum number of products.
		limit: usize,
	},
	/// Stop the worker thread.
	Shutdown,
}

/// Outcome of a single fetch.
#[derive(Debug)]
pub struct CatalogResult {
	/// Id of the request this answers.
	pub id: u64,
	/// Products or the failure.
	pub outcome: Result<Vec<Product>, CatalogError>,
}

/// Spawn the worker thread and return its command and result channels.
pub fn spawn(
	client: Arc<dyn CatalogClient>,
) -> io::Result<(Sender<CatalogCommand>, Receiver<CatalogResult>)> {
	let (command_tx, command_rx) = std::sync::mpsc::channel();
	let (result_tx, result_rx) = std::sync::mpsc::channel();

	thread::Builder::new()
		.name("catalog-worker".into())
		.spawn(move || worker_loop(client.as_ref(), command_rx, result_tx))?;

	Ok((command_tx, result_rx))
}

fn worker_loop(
	client: &dyn CatalogClient,
	command_rx: Receiver<CatalogCommand>,
	result_tx: Sender<CatalogResult>,
) {
	while let Ok(command) = command_rx.recv() {
		match command {
			CatalogCommand::Fetch { id, limit } => {
				// Skip requests that were already superseded while queued.
				let Some((id, limit)) = drain_to_latest(&command_rx, id, limit) else {
					break;
				};
				let outcome = client.products(limit);
				if result_tx.send(CatalogResult { id, outcome }).is_err() {
					break;
				}
			}
			CatalogCommand::Shutdown => break,
		}
	}
	debug!("catalog worker stopped");
}

/// Returns `None` if a shutdown was queued behind the fetch.
fn drain_to_latest(
	rx: &Receiver<CatalogCommand>,
	mut id: u64,
	mut limit: usize,
) -> Option<(u64, usize)> {
	loop {
		match rx.try_recv() {
			Ok(CatalogCommand::Fetch {
				id: new_id,
				limit: new_limit,
			}) => {
				id = new_id;
				limit = new_limit;
			}
			Ok(CatalogCommand::Shutdown) => return None,
			Err(_) => return Some((id, limit)),
		}
	}
}

/// Handle to the catalogue worker owned by the catalogue view.
pub struct CatalogRuntime {
	tx: Sender<CatalogCommand>,
	rx: Receiver<CatalogResult>,
	next_id: u64,
	current_id: Option<u64>,
}

impl std::fmt::Debug for CatalogRuntime {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CatalogRuntime")
			.field("next_id", &self.next_id)
			.field("current_id", &self.current_id)
			.finish_non_exhaustive()
	}
}

impl CatalogRuntime {
	/// Start a worker that serves requests through `client`.
	pub fn new(client: Arc<dyn CatalogClient>) -> io::Result<Self> {
		let (tx, rx) = spawn(client)?;
		Ok(Self::from_channels(tx, rx))
	}

	fn from_channels(tx: Sender<CatalogCommand>, rx: Receiver<CatalogResult>) -> Self {
		Self {
			tx,
			rx,
			next_id: 0,
			current_id: None,
		}
	}

	/// Queue a fetch of up to `limit` products. Returns the request id, or
	/// an error when the worker thread is gone.
	pub fn request(&mut self, limit: usize) -> Result<u64, SendError<CatalogCommand>> {
		self.next_id = self.next_id.wrapping_add(1);
		let id = self.next_id;
		if let Err(err) = self.tx.send(CatalogCommand::Fetch { id, limit }) {
			self.current_id = None;
			return Err(err);
		}
		self.current_id = Some(id);
		Ok(id)
	}

	/// Forget the in-flight request so its result is treated as stale.
	pub fn cancel(&mut self) {
		self.current_id = None;
	}

	/// Whether a request is outstanding.
	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.current_id.is_some()
	}

	/// Try to receive a completed result.
	pub fn try_recv(&self) -> Result<CatalogResult, TryRecvError> {
		self.rx.try_recv()
	}

	/// Check if a result answers the most recent request and mark it settled.
	pub fn accept(&mut self, id: u64) -> bool {
		if self.current_id == Some(id) {
			self.current_id = None;
			true
		} else {
			false
		}
	}

	/// Stop the worker thread.
	pub fn shutdown(&self) {
		let _ = self.tx.send(CatalogCommand::Shutdown);
	}
}

impl Drop for CatalogRuntime {
	fn drop(&mut self) {
		self.shutdown();
	}
}
