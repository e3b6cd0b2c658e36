//! Repositories holding configuration data.
//!
//! - `chain`: the registry of supported chains

mod chain;
mod error;

pub use chain::{
	default_chains, ChainRegistry, ChainRepository, ChainRepositoryTrait, ChainService,
	SOLANA_DEVNET_ID, SOLANA_MAINNET_ID,
};
pub use error::RepositoryError;
