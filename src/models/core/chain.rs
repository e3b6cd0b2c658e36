use serde::{Deserialize, Serialize};

use crate::models::ChainFamily;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NativeCurrency {
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
}

impl NativeCurrency {
	pub fn new(name: &str, symbol: &str, decimals: u8) -> Self {
		Self {
			name: name.to_string(),
			symbol: symbol.to_string(),
			decimals,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
	pub id: u64,
	pub name: String,
	pub family: ChainFamily,
	pub rpc_endpoint: String,
	#[serde(default)]
	pub fallback_rpc_endpoints: Vec<String>,
	pub explorer_url: String,
	pub native_currency: NativeCurrency,
	pub is_testnet: bool,
}

impl ChainConfig {
	/// All configured endpoints, primary first
	pub fn rpc_endpoints(&self) -> Vec<String> {
		std::iter::once(self.rpc_endpoint.clone())
			.chain(self.fallback_rpc_endpoints.iter().cloned())
			.collect()
	}
}
