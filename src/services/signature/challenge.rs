//! Login challenges.
//!
//! A challenge is a one-off message the wallet signs to prove control of an
//! address. The nonce is a random v4 uuid and the challenge expires after a
//! fixed lifetime.

use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{models::Challenge, utils::constants::DEFAULT_CHALLENGE_TTL};

/// Issues sign-in challenges
#[derive(Debug, Clone)]
pub struct ChallengeGenerator {
	ttl: Duration,
}

impl Default for ChallengeGenerator {
	fn default() -> Self {
		Self::new(DEFAULT_CHALLENGE_TTL)
	}
}

impl ChallengeGenerator {
	pub fn new(ttl: Duration) -> Self {
		Self { ttl }
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Creates a challenge for `address` issued now
	pub fn generate(&self, address: &str) -> Challenge {
		self.generate_at(address, Utc::now())
	}

	/// Creates a challenge for `address` issued at `issued_at`
	pub fn generate_at(&self, address: &str, issued_at: DateTime<Utc>) -> Challenge {
		let id = Uuid::new_v4().to_string();
		let message = format!(
			"Sign this message to verify your wallet ownership.\nAddress: {}\nNonce: {}\nTimestamp: {}",
			address,
			id,
			issued_at.timestamp()
		);
		let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);

		tracing::debug!(address = %address, nonce = %id, "Issued challenge");
		Challenge {
			id,
			address: address.to_string(),
			message,
			issued_at,
			expires_at: issued_at.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
		}
	}
}
