//! Chain-family specific model implementations.
//!
//! This module contains type definitions for the two supported chain families
//! (EVM and Solana). Each submodule holds the family-specific data shapes used by
//! the verifiers, while this module holds the tagged variants that dispatch between them.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

pub mod evm;
pub mod solana;

/// Supported chain families
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
	/// Ethereum Virtual Machine based chains
	Evm,
	/// Solana
	Solana,
}

impl std::fmt::Display for ChainFamily {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Evm => write!(f, "evm"),
			Self::Solana => write!(f, "solana"),
		}
	}
}

/// Token standard of an EVM asset
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenStandard {
	#[default]
	Erc721,
	Erc1155,
}

/// Reference to an on-chain asset whose ownership is being checked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum AssetRef {
	/// Contract-based NFT on an EVM chain.
	///
	/// When `token_id` is absent the check is collection-level (any non-zero balance).
	Evm {
		contract: String,
		token_id: Option<U256>,
		#[serde(default)]
		standard: TokenStandard,
	},
	/// SPL token mint on Solana
	Solana { mint: String },
}

impl AssetRef {
	/// ERC-721 asset reference
	pub fn erc721(contract: impl Into<String>, token_id: Option<U256>) -> Self {
		Self::Evm {
			contract: contract.into(),
			token_id,
			standard: TokenStandard::Erc721,
		}
	}

	/// ERC-1155 asset reference. A token id is mandatory for this standard.
	pub fn erc1155(contract: impl Into<String>, token_id: U256) -> Self {
		Self::Evm {
			contract: contract.into(),
			token_id: Some(token_id),
			standard: TokenStandard::Erc1155,
		}
	}

	pub fn solana(mint: impl Into<String>) -> Self {
		Self::Solana { mint: mint.into() }
	}

	pub fn family(&self) -> ChainFamily {
		match self {
			Self::Evm { .. } => ChainFamily::Evm,
			Self::Solana { .. } => ChainFamily::Solana,
		}
	}
}
