//! Metaplex metadata verification.
//!
//! Reads a mint's on-chain metadata account, follows its URI to the off-chain
//! JSON document and compares either against caller expectations. `ar://` and
//! `ipfs://` URIs are rewritten to their HTTPS gateways before fetching.

use std::sync::Arc;

use reqwest_middleware::ClientWithMiddleware;

use crate::{
	models::{MetadataAccount, MetaplexMetadata},
	services::{
		blockchain::{
			BlockchainTransport, ChainClientManager, HttpTransportClient, SolanaClientTrait,
		},
		nft::{cache::keys, NftError, VerificationCache},
		signature::pda::{decode_pubkey, metadata_address},
	},
	utils::{
		constants::{ARWEAVE_GATEWAY, IPFS_GATEWAY, METADATA_PROGRAM_ID},
		http::{create_http_client, HttpRetryConfig},
	},
};

/// Rewrites `ar://` and `ipfs://` URIs to HTTPS gateway URLs; other URIs are returned unchanged
pub fn resolve_uri(uri: &str) -> String {
	if let Some(id) = uri.strip_prefix("ar://") {
		format!("{}{}", ARWEAVE_GATEWAY, id)
	} else if let Some(cid) = uri.strip_prefix("ipfs://") {
		format!("{}{}", IPFS_GATEWAY, cid.trim_start_matches("ipfs/"))
	} else {
		uri.to_string()
	}
}

/// Metadata checks for Solana NFTs
pub struct MetaplexVerifier<T: Send + Sync + Clone = HttpTransportClient> {
	manager: Arc<ChainClientManager<T>>,
	cache: Arc<dyn VerificationCache>,
	http_client: ClientWithMiddleware,
}

impl<T> MetaplexVerifier<T>
where
	T: BlockchainTransport + Send + Sync + Clone + 'static,
{
	/// Creates a verifier fetching documents with the default retry policy
	pub fn new(
		manager: Arc<ChainClientManager<T>>,
		cache: Arc<dyn VerificationCache>,
	) -> Result<Self, NftError> {
		let http_client = create_http_client(&HttpRetryConfig::default())
			.map_err(|e| NftError::metadata_fetch(e.to_string()))?;
		Ok(Self::with_http_client(manager, cache, http_client))
	}

	pub fn with_http_client(
		manager: Arc<ChainClientManager<T>>,
		cache: Arc<dyn VerificationCache>,
		http_client: ClientWithMiddleware,
	) -> Self {
		Self {
			manager,
			cache,
			http_client,
		}
	}

	/// Decoded metadata account of `mint`, `None` if it does not exist
	pub async fn metadata_account(
		&self,
		chain_id: u64,
		mint: &str,
	) -> Result<Option<MetadataAccount>, NftError> {
		let address = metadata_address(mint)?;
		let client = self.manager.get_client(chain_id).await?.as_solana()?;

		let Some(account) = client.get_account_info(&address).await? else {
			return Ok(None);
		};
		if account.owner != METADATA_PROGRAM_ID {
			tracing::warn!(
				mint = %mint,
				owner = %account.owner,
				"Metadata address is not owned by the metadata program"
			);
			return Ok(None);
		}

		MetadataAccount::from_account_data(&account.data)
			.map(Some)
			.map_err(|e| NftError::metadata_decode(format!("metadata account {}: {}", address, e)))
	}

	/// Whether `mint` carries a Metaplex metadata account
	pub async fn is_metaplex_nft(&self, chain_id: u64, mint: &str) -> Result<bool, NftError> {
		Ok(self.metadata_account(chain_id, mint).await?.is_some())
	}

	async fn fetch_document(&self, uri: &str) -> Result<MetaplexMetadata, NftError> {
		let url = resolve_uri(uri);
		tracing::debug!(url = %url, "Fetching metadata document");

		let response = self
			.http_client
			.get(&url)
			.send()
			.await
			.map_err(|e| NftError::metadata_fetch(format!("{}: {}", url, e)))?;

		let status = response.status();
		if !status.is_success() {
			return Err(NftError::metadata_fetch(format!(
				"{} returned status {}",
				url,
				status.as_u16()
			)));
		}

		response
			.json::<MetaplexMetadata>()
			.await
			.map_err(|e| NftError::metadata_decode(format!("{}: {}", url, e)))
	}

	/// Off-chain metadata document of `mint`
	pub async fn get_metadata(&self, chain_id: u64, mint: &str) -> Result<MetaplexMetadata, NftError> {
		decode_pubkey(mint)?;
		let key = keys::metaplex_metadata(chain_id, mint);

		if let Some(cached) = self.cache.get(&key).await {
			match serde_json::from_value::<MetaplexMetadata>(cached) {
				Ok(metadata) => {
					tracing::debug!(key = %key, "Metadata cache hit");
					return Ok(metadata);
				}
				Err(e) => tracing::warn!(key = %key, error = %e, "Ignoring unreadable cached metadata"),
			}
		}

		let account = self
			.metadata_account(chain_id, mint)
			.await?
			.ok_or_else(|| NftError::MetadataNotFound(mint.to_string()))?;
		let metadata = self.fetch_document(&account.uri).await?;

		match serde_json::to_value(&metadata) {
			Ok(value) => self.cache.set(&key, value).await,
			Err(e) => tracing::warn!(key = %key, error = %e, "Metadata not cached"),
		}
		Ok(metadata)
	}

	/// Compares the off-chain document with `expected`
	pub async fn verify_metadata(
		&self,
		chain_id: u64,
		mint: &str,
		expected: &MetaplexMetadata,
	) -> Result<bool, NftError> {
		let metadata = self.get_metadata(chain_id, mint).await?;
		let matches = metadata.matches(expected);
		if !matches {
			tracing::warn!(mint = %mint, "Metadata does not match expected document");
		}
		Ok(matches)
	}

	/// Whether `creator` is a verified creator of `mint`
	pub async fn verify_creator(
		&self,
		chain_id: u64,
		mint: &str,
		creator: &str,
	) -> Result<bool, NftError> {
		decode_pubkey(creator)?;
		let account = self
			.metadata_account(chain_id, mint)
			.await?
			.ok_or_else(|| NftError::MetadataNotFound(mint.to_string()))?;
		Ok(account.has_verified_creator(creator))
	}

	/// Whether `mint` belongs to the verified collection `collection_mint`
	pub async fn verify_collection(
		&self,
		chain_id: u64,
		mint: &str,
		collection_mint: &str,
	) -> Result<bool, NftError> {
		decode_pubkey(collection_mint)?;
		let account = self
			.metadata_account(chain_id, mint)
			.await?
			.ok_or_else(|| NftError::MetadataNotFound(mint.to_string()))?;

		Ok(account
			.collection
			.is_some_and(|collection| collection.verified && collection.key == collection_mint))
	}
}
