//! Bounded FIFO of transactions awaiting submission.
//!
//! Every operation serializes through one mutex. Dequeued transactions leave
//! the live queue but stay addressable by id so their status can still be
//! looked up and moved to a terminal state. Only the most recent `history`
//! completed or failed records are retained.

use std::{
	collections::{HashMap, VecDeque},
	sync::{Mutex, MutexGuard},
};

use chrono::Utc;

use crate::{
	models::{QueuedTransaction, TransactionStatus},
	services::gas::GasError,
	utils::constants::{DEFAULT_QUEUE_CAPACITY, DEFAULT_QUEUE_HISTORY},
};

#[derive(Debug, Default)]
struct QueueState {
	/// Ids of live entries, oldest first
	order: VecDeque<String>,
	/// Live, in-flight and retained finished transactions
	records: HashMap<String, QueuedTransaction>,
	/// Ids of completed or failed records, oldest first
	finished: VecDeque<String>,
}

impl QueueState {
	fn evict_finished(&mut self, keep: usize) -> usize {
		let mut evicted = 0;
		while self.finished.len() > keep {
			if let Some(id) = self.finished.pop_front() {
				self.records.remove(&id);
				evicted += 1;
			}
		}
		evicted
	}
}

#[derive(Debug)]
pub struct TransactionQueue {
	capacity: usize,
	history: usize,
	state: Mutex<QueueState>,
}

impl Default for TransactionQueue {
	fn default() -> Self {
		Self::new(DEFAULT_QUEUE_CAPACITY)
	}
}

impl TransactionQueue {
	pub fn new(capacity: usize) -> Self {
		Self::with_history(capacity, DEFAULT_QUEUE_HISTORY)
	}

	/// Creates a queue that keeps at most `history` finished records
	pub fn with_history(capacity: usize, history: usize) -> Self {
		Self {
			capacity,
			history,
			state: Mutex::new(QueueState::default()),
		}
	}

	fn lock(&self) -> MutexGuard<'_, QueueState> {
		self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Number of live entries
	pub fn len(&self) -> usize {
		self.lock().order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().order.is_empty()
	}

	/// Appends `transaction` and returns its id.
	///
	/// Ids still known to the queue are rejected.
	pub fn enqueue(&self, transaction: QueuedTransaction) -> Result<String, GasError> {
		let mut state = self.lock();
		if state.order.len() >= self.capacity {
			return Err(GasError::queue_full(self.capacity));
		}
		if state.records.contains_key(&transaction.id) {
			return Err(GasError::duplicate_id(transaction.id));
		}

		let id = transaction.id.clone();
		state.order.push_back(id.clone());
		state.records.insert(id.clone(), transaction);
		tracing::debug!(id = %id, queued = state.order.len(), "Transaction enqueued");
		Ok(id)
	}

	/// Removes and returns the oldest live entry
	pub fn dequeue(&self) -> Option<QueuedTransaction> {
		let mut state = self.lock();
		let id = state.order.pop_front()?;
		state.records.get(&id).cloned()
	}

	/// Moves a transaction to `status`.
	///
	/// Only pending -> processing and processing -> completed | failed are accepted.
	pub fn update_status(
		&self,
		id: &str,
		status: TransactionStatus,
	) -> Result<QueuedTransaction, GasError> {
		let mut state = self.lock();
		let record = state
			.records
			.get_mut(id)
			.ok_or_else(|| GasError::not_found(id))?;

		if !record.status.can_transition_to(status) {
			return Err(GasError::invalid_transition(id, record.status, status));
		}

		record.status = status;
		record.updated_at = Utc::now();
		let updated = record.clone();
		tracing::debug!(id = %id, status = %status, "Transaction status updated");

		if status.is_terminal() {
			state.finished.push_back(id.to_string());
			let evicted = state.evict_finished(self.history);
			if evicted > 0 {
				tracing::debug!(evicted, "Finished transactions evicted");
			}
		}
		Ok(updated)
	}

	/// Drops every completed or failed record and returns how many were removed
	pub fn prune(&self) -> usize {
		let pruned = self.lock().evict_finished(0);
		tracing::debug!(pruned, "Finished transactions pruned");
		pruned
	}

	/// Looks up a transaction, whether or not it is still queued.
	///
	/// Finished records disappear once evicted or pruned.
	pub fn get(&self, id: &str) -> Option<QueuedTransaction> {
		self.lock().records.get(id).cloned()
	}

	/// Live entries in FIFO order
	pub fn transactions(&self) -> Vec<QueuedTransaction> {
		let state = self.lock();
		state
			.order
			.iter()
			.filter_map(|id| state.records.get(id).cloned())
			.collect()
	}
}
