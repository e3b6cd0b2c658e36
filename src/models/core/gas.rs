use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wei per gwei
pub const WEI_PER_GWEI: f64 = 1_000_000_000.0;

/// Latest known gas price of one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPriceSnapshot {
	pub chain_id: u64,
	pub wei_price: u128,
	pub last_updated: DateTime<Utc>,
}

impl GasPriceSnapshot {
	pub fn new(chain_id: u64, wei_price: u128) -> Self {
		Self {
			chain_id,
			wei_price,
			last_updated: Utc::now(),
		}
	}

	pub fn gwei_price(&self) -> f64 {
		self.wei_price as f64 / WEI_PER_GWEI
	}

	/// Cost of `gas` units at this price, in wei
	pub fn estimate_cost(&self, gas: u64) -> U256 {
		U256::from(self.wei_price) * U256::from(gas)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasTier {
	Safe,
	Standard,
	Fast,
}

impl GasTier {
	pub const ALL: [GasTier; 3] = [GasTier::Safe, GasTier::Standard, GasTier::Fast];

	/// Multiplier applied to the current network price
	pub fn multiplier(&self) -> u128 {
		match self {
			Self::Safe | Self::Standard => 1,
			Self::Fast => 2,
		}
	}

	pub fn estimated_time(&self) -> &'static str {
		match self {
			Self::Safe => "> 30 seconds",
			Self::Standard => "15-30 seconds",
			Self::Fast => "< 15 seconds",
		}
	}
}

/// A priced tier derived from a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasPriceLevel {
	pub tier: GasTier,
	pub wei_price: u128,
	pub gwei_price: f64,
	pub estimated_time: String,
}

impl GasPriceLevel {
	pub fn from_snapshot(tier: GasTier, snapshot: &GasPriceSnapshot) -> Self {
		let wei_price = snapshot.wei_price.saturating_mul(tier.multiplier());
		Self {
			tier,
			wei_price,
			gwei_price: wei_price as f64 / WEI_PER_GWEI,
			estimated_time: tier.estimated_time().to_string(),
		}
	}
}
