//! Blockchain client interfaces and implementations.
//!
//! Provides the pieces needed to talk to EVM chains and Solana clusters:
//!
//! - JSON-RPC transport with endpoint rotation and retries
//! - Chain family specific clients
//! - A tagged client handle and the manager owning one client per chain
//! - Error handling for blockchain operations

mod client;
mod clients;
mod error;
mod manager;
mod transports;

pub use client::ChainClient;
pub use clients::{AccountInfo, EvmClient, EvmClientTrait, SolanaClient, SolanaClientTrait};
pub use error::BlockChainError;
pub use manager::{ChainClientManager, TransportConnector};
pub use transports::{
	BlockchainTransport, EndpointManager, HttpTransportClient, RotatingTransport,
	TransientErrorRetryStrategy, TransportError, ROTATE_ON_ERROR_CODES,
};
