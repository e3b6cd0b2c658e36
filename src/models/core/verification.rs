use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a signature check
///
/// A mismatch is `verified == false`; malformed input is reported as an error
/// by the verifier instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
	pub verified: bool,
	/// Signer recovered from an EVM signature
	pub recovered_address: Option<Address>,
}

impl VerificationResult {
	pub fn verified(recovered_address: Option<Address>) -> Self {
		Self {
			verified: true,
			recovered_address,
		}
	}

	pub fn rejected(recovered_address: Option<Address>) -> Self {
		Self {
			verified: false,
			recovered_address,
		}
	}
}

/// Message a wallet is asked to sign to prove control of an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
	pub id: String,
	pub address: String,
	pub message: String,
	pub issued_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
}

impl Challenge {
	pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
		now >= self.expires_at
	}
}
