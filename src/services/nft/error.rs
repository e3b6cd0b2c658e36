//! NFT verification error types.
//!
//! Absence of a token is a negative answer, not an error. RPC failures are
//! always propagated so that an unreachable node is never read as "not owned".

use thiserror::Error;

use crate::services::{blockchain::BlockChainError, signature::SignatureError};

#[derive(Debug, Error)]
pub enum NftError {
	/// Contract, mint or owner address could not be parsed
	#[error("Invalid address: {0}")]
	InvalidAddress(String),

	/// Asset reference is incomplete or does not fit the chain
	#[error("Invalid asset: {0}")]
	InvalidAsset(String),

	#[error("RPC error: {0}")]
	Rpc(#[from] BlockChainError),

	/// Mint has no Metaplex metadata account
	#[error("Metadata not found for mint {0}")]
	MetadataNotFound(String),

	/// Off-chain metadata document could not be downloaded
	#[error("Failed to fetch metadata: {0}")]
	MetadataFetch(String),

	#[error("Failed to decode metadata: {0}")]
	MetadataDecode(String),
}

impl NftError {
	pub fn invalid_address(address: impl Into<String>) -> Self {
		let error = Self::InvalidAddress(address.into());
		log::error!("{}", error);
		error
	}

	pub fn invalid_asset(msg: impl Into<String>) -> Self {
		let error = Self::InvalidAsset(msg.into());
		log::error!("{}", error);
		error
	}

	pub fn metadata_fetch(msg: impl Into<String>) -> Self {
		let error = Self::MetadataFetch(msg.into());
		log::error!("{}", error);
		error
	}

	pub fn metadata_decode(msg: impl Into<String>) -> Self {
		let error = Self::MetadataDecode(msg.into());
		log::error!("{}", error);
		error
	}
}

impl From<SignatureError> for NftError {
	fn from(err: SignatureError) -> Self {
		match err {
			SignatureError::InvalidAddress(address) => Self::InvalidAddress(address),
			other => Self::InvalidAsset(other.to_string()),
		}
	}
}
