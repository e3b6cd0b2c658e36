//! Chain-family tagged client handle.
//!
//! A connected chain is either an EVM chain or a Solana cluster. Services that
//! only make sense for one family ask for it explicitly and get an error when
//! the handle belongs to the other one.

use std::sync::Arc;

use crate::{
	models::{ChainConfig, ChainFamily},
	services::blockchain::{
		clients::{EvmClient, SolanaClient},
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
};

/// A live client bound to exactly one chain id
pub enum ChainClient<T: Send + Sync + Clone = HttpTransportClient> {
	Evm(Arc<EvmClient<T>>),
	Solana(Arc<SolanaClient<T>>),
}

impl<T: Send + Sync + Clone> Clone for ChainClient<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Evm(client) => Self::Evm(client.clone()),
			Self::Solana(client) => Self::Solana(client.clone()),
		}
	}
}

impl<T: Send + Sync + Clone + BlockchainTransport> ChainClient<T> {
	/// Wraps `transport` in the client matching the chain's family
	pub fn from_transport(transport: T, chain: ChainConfig) -> Self {
		match chain.family {
			ChainFamily::Evm => Self::Evm(Arc::new(EvmClient::new_with_transport(transport, chain))),
			ChainFamily::Solana => {
				Self::Solana(Arc::new(SolanaClient::new_with_transport(transport, chain)))
			}
		}
	}

	pub fn chain(&self) -> &ChainConfig {
		match self {
			Self::Evm(client) => client.chain(),
			Self::Solana(client) => client.chain(),
		}
	}

	pub fn family(&self) -> ChainFamily {
		match self {
			Self::Evm(_) => ChainFamily::Evm,
			Self::Solana(_) => ChainFamily::Solana,
		}
	}

	/// The EVM client, or an error if this is a Solana chain
	pub fn as_evm(&self) -> Result<Arc<EvmClient<T>>, BlockChainError> {
		match self {
			Self::Evm(client) => Ok(client.clone()),
			Self::Solana(client) => Err(BlockChainError::wrong_family(
				client.chain().id,
				ChainFamily::Evm,
			)),
		}
	}

	/// The Solana client, or an error if this is an EVM chain
	pub fn as_solana(&self) -> Result<Arc<SolanaClient<T>>, BlockChainError> {
		match self {
			Self::Solana(client) => Ok(client.clone()),
			Self::Evm(client) => Err(BlockChainError::wrong_family(
				client.chain().id,
				ChainFamily::Solana,
			)),
		}
	}

	/// Releases the underlying transport
	pub async fn close(&self) {
		match self {
			Self::Evm(client) => client.transport().close().await,
			Self::Solana(client) => client.transport().close().await,
		}
	}
}
