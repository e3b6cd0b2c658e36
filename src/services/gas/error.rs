//! Gas monitor and transaction queue error types.

use thiserror::Error;

use crate::models::TransactionStatus;
use crate::services::blockchain::BlockChainError;

#[derive(Debug, Error)]
pub enum GasError {
	#[error("Transaction queue is full (capacity {0})")]
	QueueFull(usize),

	#[error("Transaction not found: {0}")]
	NotFound(String),

	#[error("Transaction already queued: {0}")]
	DuplicateId(String),

	#[error("Invalid status transition for {id}: {from} -> {to}")]
	InvalidTransition {
		id: String,
		from: TransactionStatus,
		to: TransactionStatus,
	},

	#[error("RPC error: {0}")]
	Rpc(#[from] BlockChainError),
}

impl GasError {
	pub fn queue_full(capacity: usize) -> Self {
		let error = Self::QueueFull(capacity);
		log::error!("{}", error);
		error
	}

	pub fn not_found(id: impl Into<String>) -> Self {
		let error = Self::NotFound(id.into());
		log::error!("{}", error);
		error
	}

	pub fn duplicate_id(id: impl Into<String>) -> Self {
		let error = Self::DuplicateId(id.into());
		log::error!("{}", error);
		error
	}

	pub fn invalid_transition(
		id: impl Into<String>,
		from: TransactionStatus,
		to: TransactionStatus,
	) -> Self {
		let error = Self::InvalidTransition {
			id: id.into(),
			from,
			to,
		};
		log::error!("{}", error);
		error
	}
}
