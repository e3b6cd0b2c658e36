//! Blockchain error types and handling.
//!
//! Errors raised while connecting to chains and issuing RPC calls. RPC failures
//! always surface to the caller; nothing here is turned into a negative answer.

use log::error;

use crate::{models::ChainFamily, services::blockchain::transports::TransportError};

/// Represents possible errors that can occur during blockchain operations
#[derive(Debug)]
pub enum BlockChainError {
	/// No client has been added for the chain id
	ChainNotConnected(u64),

	/// The chain id is not present in the registry
	ChainNotSupported(u64),

	/// The chain belongs to a different family than the operation needs
	WrongFamily { chain_id: u64, expected: ChainFamily },

	/// Errors related to network connectivity issues
	ConnectionError(String),

	/// Malformed requests, node-side RPC errors or unexpected responses
	RequestError(String),

	/// Internal errors within the blockchain client
	InternalError(String),
}

impl BlockChainError {
	fn format_message(&self) -> String {
		match self {
			Self::ChainNotConnected(id) => format!("Chain not connected: {}", id),
			Self::ChainNotSupported(id) => format!("Chain not supported: {}", id),
			Self::WrongFamily { chain_id, expected } => {
				format!("Chain {} is not in the {} family", chain_id, expected)
			}
			Self::ConnectionError(msg) => format!("Connection error: {}", msg),
			Self::RequestError(msg) => format!("Request error: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	pub fn chain_not_connected(chain_id: u64) -> Self {
		let error = Self::ChainNotConnected(chain_id);
		error!("{}", error.format_message());
		error
	}

	pub fn chain_not_supported(chain_id: u64) -> Self {
		let error = Self::ChainNotSupported(chain_id);
		error!("{}", error.format_message());
		error
	}

	pub fn wrong_family(chain_id: u64, expected: ChainFamily) -> Self {
		let error = Self::WrongFamily { chain_id, expected };
		error!("{}", error.format_message());
		error
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl std::fmt::Display for BlockChainError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl std::error::Error for BlockChainError {}

impl From<TransportError> for BlockChainError {
	fn from(err: TransportError) -> Self {
		match err {
			TransportError::Closed | TransportError::Network(_) | TransportError::UrlRotation(_) => {
				Self::connection_error(err.to_string())
			}
			_ => Self::request_error(err.to_string()),
		}
	}
}
