//! EVM-compatible blockchain client implementation.
//!
//! Wraps the handful of JSON-RPC calls the verifiers need: read-only contract
//! calls, gas price, balance, code and nonce lookups.

use std::str::FromStr;

use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde_json::json;

use crate::{
	models::ChainConfig,
	services::blockchain::{
		clients::{extract_result, parse_hex_u64},
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
};

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
#[derive(Clone)]
pub struct EvmClient<T: Send + Sync + Clone> {
	transport: T,
	chain: ChainConfig,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(transport: T, chain: ChainConfig) -> Self {
		Self { transport, chain }
	}

	pub fn chain(&self) -> &ChainConfig {
		&self.chain
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}
}

impl EvmClient<HttpTransportClient> {
	/// Connects to the chain's configured endpoints
	pub async fn new(chain: &ChainConfig) -> Result<Self, BlockChainError> {
		let transport = HttpTransportClient::new(chain)
			.await
			.map_err(|e| BlockChainError::connection_error(e.to_string()))?;
		Ok(Self::new_with_transport(transport, chain.clone()))
	}
}

/// Read-only EVM node queries
#[async_trait]
pub trait EvmClientTrait: Send + Sync {
	/// Executes a read-only contract call against the latest block
	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, BlockChainError>;

	/// Current gas price in wei
	async fn gas_price(&self) -> Result<u128, BlockChainError>;

	/// Native balance in wei
	async fn get_balance(&self, address: Address) -> Result<U256, BlockChainError>;

	/// Deployed bytecode, empty for externally owned accounts
	async fn get_code(&self, address: Address) -> Result<Bytes, BlockChainError>;

	async fn get_transaction_count(&self, address: Address) -> Result<u64, BlockChainError>;

	async fn block_number(&self) -> Result<u64, BlockChainError>;

	/// Whether code is deployed at `address`
	async fn is_contract(&self, address: Address) -> Result<bool, BlockChainError> {
		Ok(!self.get_code(address).await?.is_empty())
	}
}

fn parse_bytes(value: &serde_json::Value, method: &str) -> Result<Bytes, BlockChainError> {
	value
		.as_str()
		.and_then(|s| Bytes::from_str(s).ok())
		.ok_or_else(|| {
			BlockChainError::request_error(format!("Invalid data in {} response: {}", method, value))
		})
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> EvmClientTrait for EvmClient<T> {
	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, BlockChainError> {
		let params = json!([{ "to": to.to_string(), "data": data.to_string() }, "latest"]);
		let response = self
			.transport
			.send_raw_request("eth_call", Some(params))
			.await?;
		let result = extract_result(response, "eth_call")?;
		parse_bytes(&result, "eth_call")
	}

	async fn gas_price(&self) -> Result<u128, BlockChainError> {
		let response = self
			.transport
			.send_raw_request("eth_gasPrice", None::<serde_json::Value>)
			.await?;
		let result = extract_result(response, "eth_gasPrice")?;
		result
			.as_str()
			.and_then(|s| u128::from_str_radix(s.trim_start_matches("0x"), 16).ok())
			.ok_or_else(|| {
				BlockChainError::request_error(format!("Invalid gas price: {}", result))
			})
	}

	async fn get_balance(&self, address: Address) -> Result<U256, BlockChainError> {
		let params = json!([address.to_string(), "latest"]);
		let response = self
			.transport
			.send_raw_request("eth_getBalance", Some(params))
			.await?;
		let result = extract_result(response, "eth_getBalance")?;
		result
			.as_str()
			.and_then(|s| U256::from_str(s).ok())
			.ok_or_else(|| BlockChainError::request_error(format!("Invalid balance: {}", result)))
	}

	async fn get_code(&self, address: Address) -> Result<Bytes, BlockChainError> {
		let params = json!([address.to_string(), "latest"]);
		let response = self
			.transport
			.send_raw_request("eth_getCode", Some(params))
			.await?;
		let result = extract_result(response, "eth_getCode")?;
		parse_bytes(&result, "eth_getCode")
	}

	async fn get_transaction_count(&self, address: Address) -> Result<u64, BlockChainError> {
		let params = json!([address.to_string(), "latest"]);
		let response = self
			.transport
			.send_raw_request("eth_getTransactionCount", Some(params))
			.await?;
		let result = extract_result(response, "eth_getTransactionCount")?;
		parse_hex_u64(&result, "eth_getTransactionCount")
	}

	async fn block_number(&self) -> Result<u64, BlockChainError> {
		let response = self
			.transport
			.send_raw_request("eth_blockNumber", None::<serde_json::Value>)
			.await?;
		let result = extract_result(response, "eth_blockNumber")?;
		parse_hex_u64(&result, "eth_blockNumber")
	}
}
