//! Blockchain client implementations.
//!
//! Contains chain-family specific clients built on top of a JSON-RPC transport:
//! - EVM client for Ethereum-compatible chains
//! - Solana client for SPL token and account lookups

mod evm {
	pub mod client;
}
mod solana {
	pub mod client;
}

pub use evm::client::{EvmClient, EvmClientTrait};
pub use solana::client::{AccountInfo, SolanaClient, SolanaClientTrait};

use serde_json::Value;

use crate::services::blockchain::BlockChainError;

/// Takes the `result` member out of a JSON-RPC response
pub(crate) fn extract_result(mut response: Value, method: &str) -> Result<Value, BlockChainError> {
	response
		.get_mut("result")
		.map(Value::take)
		.ok_or_else(|| {
			BlockChainError::request_error(format!("Missing 'result' field in {} response", method))
		})
}

/// Parses a `0x`-prefixed hex quantity
pub(crate) fn parse_hex_u64(value: &Value, method: &str) -> Result<u64, BlockChainError> {
	value
		.as_str()
		.and_then(|s| u64::from_str_radix(s.trim_start_matches("0x"), 16).ok())
		.ok_or_else(|| {
			BlockChainError::request_error(format!("Invalid quantity in {} response: {}", method, value))
		})
}
