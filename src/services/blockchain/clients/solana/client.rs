//! Solana blockchain client implementation.
//!
//! Account and SPL token lookups over Solana JSON-RPC. Token account queries
//! use the `jsonParsed` encoding so the node decodes the SPL layout for us.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use crate::{
	models::{ChainConfig, TokenAccount},
	services::blockchain::{
		clients::extract_result,
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
	utils::constants::TOKEN_PROGRAM_ID,
};

/// Size in bytes of an SPL token account
const TOKEN_ACCOUNT_SIZE: u64 = 165;

/// Raw account as returned by `getAccountInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
	pub data: Vec<u8>,
	/// Owning program id
	pub owner: String,
	pub lamports: u64,
	pub executable: bool,
}

/// Client implementation for Solana
#[derive(Clone)]
pub struct SolanaClient<T: Send + Sync + Clone> {
	transport: T,
	chain: ChainConfig,
}

impl<T: Send + Sync + Clone> SolanaClient<T> {
	/// Creates a new Solana client instance with a specific transport client
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

impl SolanaClient<HttpTransportClient> {
	/// Connects to the chain's configured endpoints
	pub async fn new(chain: &ChainConfig) -> Result<Self, BlockChainError> {
		let transport = HttpTransportClient::new(chain)
			.await
			.map_err(|e| BlockChainError::connection_error(e.to_string()))?;
		Ok(Self::new_with_transport(transport, chain.clone()))
	}
}

/// Solana node queries needed for ownership and metadata checks
#[async_trait]
pub trait SolanaClientTrait: Send + Sync {
	/// Fetches an account, `None` when it does not exist
	async fn get_account_info(&self, pubkey: &str) -> Result<Option<AccountInfo>, BlockChainError>;

	/// Every SPL token account for `mint`, regardless of owner
	async fn get_token_accounts_by_mint(
		&self,
		mint: &str,
	) -> Result<Vec<TokenAccount>, BlockChainError>;

	/// SPL token accounts of `owner` restricted to `mint`
	async fn get_token_accounts_by_owner(
		&self,
		owner: &str,
		mint: &str,
	) -> Result<Vec<TokenAccount>, BlockChainError>;

	/// Balance in lamports
	async fn get_balance(&self, pubkey: &str) -> Result<u64, BlockChainError>;

	/// `true` when the node reports `ok`
	async fn get_health(&self) -> Result<bool, BlockChainError>;
}

/// Converts one `{pubkey, account}` entry of a `jsonParsed` token account list.
/// Entries that are not parsed SPL token accounts yield `None`.
fn parse_token_account(entry: &Value) -> Option<TokenAccount> {
	let address = entry.get("pubkey")?.as_str()?;
	let info = entry
		.get("account")?
		.get("data")?
		.get("parsed")?
		.get("info")?;
	let amount = info
		.get("tokenAmount")?
		.get("amount")?
		.as_str()?
		.parse::<u64>()
		.ok()?;

	Some(TokenAccount {
		address: address.to_string(),
		owner: info.get("owner")?.as_str()?.to_string(),
		mint: info.get("mint")?.as_str()?.to_string(),
		amount,
	})
}

fn parse_token_accounts(entries: &Value, method: &str) -> Result<Vec<TokenAccount>, BlockChainError> {
	let entries = entries.as_array().ok_or_else(|| {
		BlockChainError::request_error(format!("Expected account list in {} response", method))
	})?;

	Ok(entries
		.iter()
		.filter_map(|entry| {
			let parsed = parse_token_account(entry);
			if parsed.is_none() {
				tracing::debug!(method = method, "Skipping unparsable token account entry");
			}
			parsed
		})
		.collect())
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> SolanaClientTrait for SolanaClient<T> {
	async fn get_account_info(&self, pubkey: &str) -> Result<Option<AccountInfo>, BlockChainError> {
		let params = json!([pubkey, { "encoding": "base64" }]);
		let response = self
			.transport
			.send_raw_request("getAccountInfo", Some(params))
			.await?;
		let result = extract_result(response, "getAccountInfo")?;

		let value = match result.get("value") {
			Some(Value::Null) | None => return Ok(None),
			Some(value) => value,
		};

		let encoded = value
			.get("data")
			.and_then(|data| data.get(0))
			.and_then(Value::as_str)
			.ok_or_else(|| BlockChainError::request_error("Missing account data"))?;
		let data = STANDARD
			.decode(encoded)
			.map_err(|e| BlockChainError::request_error(format!("Invalid account data: {}", e)))?;

		Ok(Some(AccountInfo {
			data,
			owner: value
				.get("owner")
				.and_then(Value::as_str)
				.unwrap_or_default()
				.to_string(),
			lamports: value.get("lamports").and_then(Value::as_u64).unwrap_or(0),
			executable: value
				.get("executable")
				.and_then(Value::as_bool)
				.unwrap_or(false),
		}))
	}

	async fn get_token_accounts_by_mint(
		&self,
		mint: &str,
	) -> Result<Vec<TokenAccount>, BlockChainError> {
		let params = json!([
			TOKEN_PROGRAM_ID,
			{
				"encoding": "jsonParsed",
				"filters": [
					{ "dataSize": TOKEN_ACCOUNT_SIZE },
					{ "memcmp": { "offset": 0, "bytes": mint } }
				]
			}
		]);
		let response = self
			.transport
			.send_raw_request("getProgramAccounts", Some(params))
			.await?;
		let result = extract_result(response, "getProgramAccounts")?;
		parse_token_accounts(&result, "getProgramAccounts")
	}

	async fn get_token_accounts_by_owner(
		&self,
		owner: &str,
		mint: &str,
	) -> Result<Vec<TokenAccount>, BlockChainError> {
		let params = json!([owner, { "mint": mint }, { "encoding": "jsonParsed" }]);
		let response = self
			.transport
			.send_raw_request("getTokenAccountsByOwner", Some(params))
			.await?;
		let result = extract_result(response, "getTokenAccountsByOwner")?;
		parse_token_accounts(
			result.get("value").unwrap_or(&Value::Null),
			"getTokenAccountsByOwner",
		)
	}

	async fn get_balance(&self, pubkey: &str) -> Result<u64, BlockChainError> {
		let response = self
			.transport
			.send_raw_request("getBalance", Some(json!([pubkey])))
			.await?;
		let result = extract_result(response, "getBalance")?;
		result
			.get("value")
			.and_then(Value::as_u64)
			.ok_or_else(|| BlockChainError::request_error(format!("Invalid balance: {}", result)))
	}

	async fn get_health(&self) -> Result<bool, BlockChainError> {
		let response = self
			.transport
			.send_raw_request("getHealth", None::<Value>)
			.await?;
		let result = extract_result(response, "getHealth")?;
		Ok(result.as_str() == Some("ok"))
	}
}
