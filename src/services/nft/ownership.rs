//! NFT ownership verification.
//!
//! One entry point answers "does this address hold this asset" for both chain
//! families:
//!
//! - EVM: `ownerOf(tokenId)` when a token id is given, otherwise
//!   `balanceOf(owner) > 0`; ERC-1155 uses `balanceOf(owner, id) > 0`.
//! - Solana: among all SPL token accounts of the mint, the one with the largest
//!   amount is authoritative; the owner must match and the amount be non-zero.
//!
//! Every answer is read from the cache first and written back on a miss.

use std::{collections::BTreeMap, sync::Arc};

use alloy::{
	primitives::{Address, Bytes, U256},
	sol,
	sol_types::SolCall,
};
use serde_json::Value;

use crate::{
	models::{AssetRef, TokenAccount, TokenStandard},
	services::{
		blockchain::{
			BlockChainError, BlockchainTransport, ChainClientManager, EvmClientTrait,
			HttpTransportClient, SolanaClientTrait,
		},
		nft::{cache::keys, NftError, VerificationCache},
		signature::{pda::decode_pubkey, EvmSignatureVerifier},
	},
};

sol! {
	interface IERC721 {
		function ownerOf(uint256 tokenId) external view returns (address owner);
		function balanceOf(address owner) external view returns (uint256 balance);
		function tokenURI(uint256 tokenId) external view returns (string memory);
		function isApprovedForAll(address owner, address operator) external view returns (bool);
	}

	interface IERC1155 {
		function balanceOf(address account, uint256 id) external view returns (uint256);
		function balanceOfBatch(address[] accounts, uint256[] ids) external view returns (uint256[]);
		function uri(uint256 id) external view returns (string memory);
	}
}

fn parse_evm_address(address: &str) -> Result<Address, NftError> {
	EvmSignatureVerifier::parse_address(address).map_err(NftError::from)
}

fn decode_return<C: SolCall>(data: &Bytes) -> Result<C::Return, NftError> {
	C::abi_decode_returns(data).map_err(|e| {
		NftError::Rpc(BlockChainError::request_error(format!(
			"Failed to decode {} result: {}",
			C::SIGNATURE,
			e
		)))
	})
}

/// Cross-chain ownership checks
pub struct NftOwnershipVerifier<T: Send + Sync + Clone = HttpTransportClient> {
	manager: Arc<ChainClientManager<T>>,
	cache: Arc<dyn VerificationCache>,
}

impl<T> NftOwnershipVerifier<T>
where
	T: BlockchainTransport + Send + Sync + Clone + 'static,
{
	pub fn new(manager: Arc<ChainClientManager<T>>, cache: Arc<dyn VerificationCache>) -> Self {
		Self { manager, cache }
	}

	/// Whether `owner` holds `asset` on `chain_id`
	pub async fn verify_ownership(
		&self,
		chain_id: u64,
		asset: &AssetRef,
		owner: &str,
	) -> Result<bool, NftError> {
		match asset {
			AssetRef::Evm {
				contract,
				token_id,
				standard,
			} => match (standard, token_id) {
				(TokenStandard::Erc721, Some(token_id)) => {
					self.erc721_owns_token(chain_id, contract, *token_id, owner)
						.await
				}
				(TokenStandard::Erc721, None) => {
					self.erc721_holds_any(chain_id, contract, owner).await
				}
				(TokenStandard::Erc1155, Some(token_id)) => {
					self.erc1155_holds(chain_id, contract, *token_id, owner)
						.await
				}
				(TokenStandard::Erc1155, None) => Err(NftError::invalid_asset(
					"ERC-1155 ownership requires a token id",
				)),
			},
			AssetRef::Solana { mint } => self.solana_holds(chain_id, mint, owner).await,
		}
	}

	/// Looks `key` up in the cache, computing and storing the answer on a miss
	async fn cached_bool<F>(&self, key: String, compute: F) -> Result<bool, NftError>
	where
		F: std::future::Future<Output = Result<bool, NftError>>,
	{
		if let Some(hit) = self.cache.get(&key).await.as_ref().and_then(Value::as_bool) {
			tracing::debug!(key = %key, "Ownership cache hit");
			return Ok(hit);
		}

		tracing::debug!(key = %key, "Ownership cache miss");
		let owned = compute.await?;
		self.cache.set(&key, Value::Bool(owned)).await;
		Ok(owned)
	}

	async fn evm_call<C: SolCall>(
		&self,
		chain_id: u64,
		contract: Address,
		call: C,
	) -> Result<C::Return, NftError> {
		let client = self.manager.get_client(chain_id).await?.as_evm()?;
		let data = client
			.call(contract, Bytes::from(call.abi_encode()))
			.await?;
		decode_return::<C>(&data)
	}

	async fn erc721_owns_token(
		&self,
		chain_id: u64,
		contract: &str,
		token_id: U256,
		owner: &str,
	) -> Result<bool, NftError> {
		let contract_address = parse_evm_address(contract)?;
		let owner_address = parse_evm_address(owner)?;

		let key = keys::erc721_owner(chain_id, contract, token_id, owner);
		self.cached_bool(key, async {
			let holder = self
				.evm_call(
					chain_id,
					contract_address,
					IERC721::ownerOfCall { tokenId: token_id },
				)
				.await?;
			Ok(holder == owner_address)
		})
		.await
	}

	async fn erc721_holds_any(
		&self,
		chain_id: u64,
		contract: &str,
		owner: &str,
	) -> Result<bool, NftError> {
		let contract_address = parse_evm_address(contract)?;
		let owner_address = parse_evm_address(owner)?;

		let key = keys::erc721_balance(chain_id, contract, owner);
		self.cached_bool(key, async {
			let balance = self
				.evm_call(
					chain_id,
					contract_address,
					IERC721::balanceOfCall {
						owner: owner_address,
					},
				)
				.await?;
			Ok(!balance.is_zero())
		})
		.await
	}

	async fn erc1155_holds(
		&self,
		chain_id: u64,
		contract: &str,
		token_id: U256,
		owner: &str,
	) -> Result<bool, NftError> {
		let contract_address = parse_evm_address(contract)?;
		let owner_address = parse_evm_address(owner)?;

		let key = keys::erc1155_balance(chain_id, contract, token_id, owner);
		self.cached_bool(key, async {
			let balance = self
				.evm_call(
					chain_id,
					contract_address,
					IERC1155::balanceOfCall {
						account: owner_address,
						id: token_id,
					},
				)
				.await?;
			Ok(!balance.is_zero())
		})
		.await
	}

	/// ERC-1155 holdings of `owner` for several token ids in one call
	pub async fn erc1155_holds_batch(
		&self,
		chain_id: u64,
		contract: &str,
		owner: &str,
		token_ids: &[U256],
	) -> Result<BTreeMap<U256, bool>, NftError> {
		let contract_address = parse_evm_address(contract)?;
		let owner_address = parse_evm_address(owner)?;

		let balances = self
			.evm_call(
				chain_id,
				contract_address,
				IERC1155::balanceOfBatchCall {
					accounts: vec![owner_address; token_ids.len()],
					ids: token_ids.to_vec(),
				},
			)
			.await?;

		if balances.len() != token_ids.len() {
			return Err(NftError::Rpc(BlockChainError::request_error(format!(
				"balanceOfBatch returned {} balances for {} ids",
				balances.len(),
				token_ids.len()
			))));
		}

		Ok(token_ids
			.iter()
			.zip(balances)
			.map(|(id, balance)| (*id, !balance.is_zero()))
			.collect())
	}

	/// Whether `operator` may transfer every token `owner` holds in `contract`
	pub async fn is_approved_for_all(
		&self,
		chain_id: u64,
		contract: &str,
		owner: &str,
		operator: &str,
	) -> Result<bool, NftError> {
		let contract_address = parse_evm_address(contract)?;
		let call = IERC721::isApprovedForAllCall {
			owner: parse_evm_address(owner)?,
			operator: parse_evm_address(operator)?,
		};
		self.evm_call(chain_id, contract_address, call).await
	}

	/// Metadata URI of an EVM token
	pub async fn token_uri(
		&self,
		chain_id: u64,
		contract: &str,
		token_id: U256,
		standard: TokenStandard,
	) -> Result<String, NftError> {
		let contract_address = parse_evm_address(contract)?;
		match standard {
			TokenStandard::Erc721 => {
				self.evm_call(
					chain_id,
					contract_address,
					IERC721::tokenURICall { tokenId: token_id },
				)
				.await
			}
			TokenStandard::Erc1155 => {
				self.evm_call(chain_id, contract_address, IERC1155::uriCall { id: token_id })
					.await
			}
		}
	}

	/// Token account with the largest balance for `mint`, if any exists
	pub async fn largest_token_account(
		&self,
		chain_id: u64,
		mint: &str,
	) -> Result<Option<TokenAccount>, NftError> {
		decode_pubkey(mint)?;
		let client = self.manager.get_client(chain_id).await?.as_solana()?;
		let accounts = client.get_token_accounts_by_mint(mint).await?;
		Ok(accounts.into_iter().max_by_key(|account| account.amount))
	}

	async fn solana_holds(&self, chain_id: u64, mint: &str, owner: &str) -> Result<bool, NftError> {
		decode_pubkey(mint)?;
		decode_pubkey(owner)?;

		let key = keys::metaplex_owner(chain_id, mint, owner);
		self.cached_bool(key, async {
			match self.largest_token_account(chain_id, mint).await? {
				Some(account) => Ok(account.is_held_by(owner)),
				None => {
					tracing::debug!(mint = %mint, "No token accounts for mint");
					Ok(false)
				}
			}
		})
		.await
	}
}
