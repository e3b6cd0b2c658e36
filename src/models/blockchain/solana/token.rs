//! SPL token account data structures.

use serde::{Deserialize, Serialize};

/// A token account holding some amount of one mint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
	/// Address of the token account itself
	pub address: String,
	/// Wallet that owns the token account
	pub owner: String,
	pub mint: String,
	/// Raw amount in the mint's smallest unit
	pub amount: u64,
}

impl TokenAccount {
	/// Whether `wallet` holds a non-zero balance through this account
	pub fn is_held_by(&self, wallet: &str) -> bool {
		self.owner == wallet && self.amount > 0
	}
}
