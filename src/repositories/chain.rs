//! Chain registry.
//!
//! Holds the table of supported chains keyed by numeric chain id. The table
//! starts from a built-in set of well-known chains and can be extended or
//! overridden by JSON definitions loaded through [`ConfigLoader`].

use std::{collections::HashMap, path::Path};

use crate::{
	models::{ChainConfig, ChainFamily, ConfigLoader, NativeCurrency},
	repositories::error::RepositoryError,
};

/// Identifier used for Solana mainnet-beta in the registry
pub const SOLANA_MAINNET_ID: u64 = 101;
/// Identifier used for Solana devnet in the registry
pub const SOLANA_DEVNET_ID: u64 = 103;

#[allow(clippy::too_many_arguments)]
fn chain(
	id: u64,
	name: &str,
	family: ChainFamily,
	rpc: &str,
	explorer: &str,
	currency: NativeCurrency,
	is_testnet: bool,
) -> ChainConfig {
	ChainConfig {
		id,
		name: name.to_string(),
		family,
		rpc_endpoint: rpc.to_string(),
		fallback_rpc_endpoints: vec![],
		explorer_url: explorer.to_string(),
		native_currency: currency,
		is_testnet,
	}
}

/// Built-in chain table
pub fn default_chains() -> Vec<ChainConfig> {
	let eth = || NativeCurrency::new("Ether", "ETH", 18);
	let matic = || NativeCurrency::new("Polygon", "MATIC", 18);
	let bnb = || NativeCurrency::new("BNB", "BNB", 18);
	let sol = || NativeCurrency::new("Solana", "SOL", 9);
	use ChainFamily::{Evm, Solana};

	vec![
		chain(1, "Ethereum", Evm, "https://eth.llamarpc.com", "https://etherscan.io", eth(), false),
		chain(
			11155111,
			"Ethereum Sepolia",
			Evm,
			"https://rpc.sepolia.org",
			"https://sepolia.etherscan.io",
			eth(),
			true,
		),
		chain(137, "Polygon", Evm, "https://polygon-rpc.com", "https://polygonscan.com", matic(), false),
		chain(
			80001,
			"Polygon Mumbai",
			Evm,
			"https://rpc-mumbai.maticvigil.com",
			"https://mumbai.polygonscan.com",
			matic(),
			true,
		),
		chain(
			56,
			"Binance Smart Chain",
			Evm,
			"https://bsc-dataseed1.binance.org:8545",
			"https://bscscan.com",
			bnb(),
			false,
		),
		chain(
			97,
			"BSC Testnet",
			Evm,
			"https://data-seed-prebsc-1-b.binance.org:8545",
			"https://testnet.bscscan.com",
			bnb(),
			true,
		),
		chain(42161, "Arbitrum One", Evm, "https://arb1.arbitrum.io/rpc", "https://arbiscan.io", eth(), false),
		chain(
			421614,
			"Arbitrum Sepolia",
			Evm,
			"https://sepolia-rollup.arbitrum.io/rpc",
			"https://sepolia.arbiscan.io",
			eth(),
			true,
		),
		chain(10, "Optimism", Evm, "https://mainnet.optimism.io", "https://optimistic.etherscan.io", eth(), false),
		chain(
			11155420,
			"Optimism Sepolia",
			Evm,
			"https://sepolia.optimism.io",
			"https://sepolia-optimistic.etherscan.io",
			eth(),
			true,
		),
		chain(
			SOLANA_MAINNET_ID,
			"Solana",
			Solana,
			"https://api.mainnet-beta.solana.com",
			"https://explorer.solana.com",
			sol(),
			false,
		),
		chain(
			SOLANA_DEVNET_ID,
			"Solana Devnet",
			Solana,
			"https://api.devnet.solana.com",
			"https://explorer.solana.com/?cluster=devnet",
			sol(),
			true,
		),
	]
}

#[derive(Debug, Clone)]
pub struct ChainRepository {
	pub chains: HashMap<u64, ChainConfig>,
}

impl ChainRepository {
	/// Built-in table overlaid with the definitions found in `path`
	pub fn new(path: Option<&Path>) -> Result<Self, RepositoryError> {
		let mut repository = Self::with_defaults();
		let loaded: HashMap<u64, ChainConfig> = ChainConfig::load_all(path)
			.map_err(|e| RepositoryError::load_error(format!("Failed to load chains: {}", e)))?;
		repository.chains.extend(loaded);
		Ok(repository)
	}

	pub fn with_defaults() -> Self {
		Self::from_chains(default_chains())
	}

	pub fn from_chains(chains: impl IntoIterator<Item = ChainConfig>) -> Self {
		Self {
			chains: chains.into_iter().map(|c| (c.id, c)).collect(),
		}
	}

	/// Adds or replaces a chain definition after validating it
	pub fn register(&mut self, chain: ChainConfig) -> Result<(), RepositoryError> {
		chain
			.validate()
			.map_err(RepositoryError::validation_error)?;
		tracing::info!(chain_id = chain.id, name = %chain.name, "Registered chain");
		self.chains.insert(chain.id, chain);
		Ok(())
	}

	pub fn unregister(&mut self, chain_id: u64) -> Result<ChainConfig, RepositoryError> {
		self.chains
			.remove(&chain_id)
			.ok_or_else(|| RepositoryError::not_found(chain_id))
	}
}

pub trait ChainRepositoryTrait: Send + Sync {
	fn load_all(&self, path: Option<&Path>) -> Result<HashMap<u64, ChainConfig>, RepositoryError>;
	fn get(&self, chain_id: u64) -> Option<ChainConfig>;
	fn get_all(&self) -> HashMap<u64, ChainConfig>;
}

impl ChainRepositoryTrait for ChainRepository {
	fn load_all(&self, path: Option<&Path>) -> Result<HashMap<u64, ChainConfig>, RepositoryError> {
		ChainConfig::load_all(path)
			.map_err(|e| RepositoryError::load_error(format!("Failed to load chains: {}", e)))
	}

	fn get(&self, chain_id: u64) -> Option<ChainConfig> {
		self.chains.get(&chain_id).cloned()
	}

	fn get_all(&self) -> HashMap<u64, ChainConfig> {
		self.chains.clone()
	}
}

/// Read-only view over a chain repository
pub struct ChainService<T: ChainRepositoryTrait> {
	repository: T,
}

/// Registry backed by the default repository
pub type ChainRegistry = ChainService<ChainRepository>;

impl<T: ChainRepositoryTrait> ChainService<T> {
	pub fn new(path: Option<&Path>) -> Result<ChainService<ChainRepository>, RepositoryError> {
		let repository = ChainRepository::new(path)?;
		Ok(ChainService { repository })
	}

	pub fn new_with_repository(repository: T) -> Self {
		ChainService { repository }
	}

	pub fn get(&self, chain_id: u64) -> Option<ChainConfig> {
		self.repository.get(chain_id)
	}

	pub fn get_all(&self) -> HashMap<u64, ChainConfig> {
		self.repository.get_all()
	}

	/// All registered chains ordered by id
	pub fn list(&self) -> Vec<ChainConfig> {
		self.list_where(|_| true)
	}

	pub fn list_mainnets(&self) -> Vec<ChainConfig> {
		self.list_where(|c| !c.is_testnet)
	}

	pub fn list_testnets(&self) -> Vec<ChainConfig> {
		self.list_where(|c| c.is_testnet)
	}

	fn list_where(&self, predicate: impl Fn(&ChainConfig) -> bool) -> Vec<ChainConfig> {
		let mut chains: Vec<_> = self
			.repository
			.get_all()
			.into_values()
			.filter(|c| predicate(c))
			.collect();
		chains.sort_by_key(|c| c.id);
		chains
	}
}

impl ChainRegistry {
	/// Registry holding only the built-in table
	pub fn with_defaults() -> Self {
		ChainService::new_with_repository(ChainRepository::with_defaults())
	}
}
