use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
	Pending,
	Processing,
	Completed,
	Failed,
}

impl TransactionStatus {
	/// Allowed moves: pending -> processing -> {completed | failed}
	pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
		matches!(
			(self, next),
			(Self::Pending, Self::Processing)
				| (Self::Processing, Self::Completed)
				| (Self::Processing, Self::Failed)
		)
	}

	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Completed | Self::Failed)
	}
}

impl std::fmt::Display for TransactionStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			Self::Pending => "pending",
			Self::Processing => "processing",
			Self::Completed => "completed",
			Self::Failed => "failed",
		};
		write!(f, "{}", s)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedTransaction {
	pub id: String,
	pub from: String,
	pub to: String,
	/// Value in wei, decimal string
	pub value: String,
	/// Hex-encoded calldata
	pub data: String,
	pub gas_limit: u64,
	pub gas_price: u128,
	pub status: TransactionStatus,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl QueuedTransaction {
	/// Creates a pending transaction with a fresh id
	pub fn new(
		from: impl Into<String>,
		to: impl Into<String>,
		value: impl Into<String>,
		data: impl Into<String>,
		gas_limit: u64,
		gas_price: u128,
	) -> Self {
		let now = Utc::now();
		Self {
			id: uuid::Uuid::new_v4().to_string(),
			from: from.into(),
			to: to.into(),
			value: value.into(),
			data: data.into(),
			gas_limit,
			gas_price,
			status: TransactionStatus::Pending,
			created_at: now,
			updated_at: now,
		}
	}
}
