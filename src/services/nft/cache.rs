//! Verification result cache.
//!
//! The host application supplies the cache. Ownership and metadata lookups read
//! it before touching the network and write the fresh answer back on a miss.
//! Nothing here invalidates entries; a value may simply be absent.

use std::{
	collections::HashMap,
	time::{Duration, Instant},
};

use alloy::primitives::U256;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

/// Key-value store for verification answers
#[async_trait]
pub trait VerificationCache: Send + Sync {
	async fn get(&self, key: &str) -> Option<Value>;

	async fn set(&self, key: &str, value: Value);
}

/// Process-local cache with an optional time to live
#[derive(Debug, Default)]
pub struct InMemoryCache {
	entries: RwLock<HashMap<String, (Value, Instant)>>,
	ttl: Option<Duration>,
}

impl InMemoryCache {
	/// Cache whose entries never expire
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			entries: RwLock::new(HashMap::new()),
			ttl: Some(ttl),
		}
	}

	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}

	pub async fn clear(&self) {
		self.entries.write().await.clear();
	}

	fn is_fresh(&self, stored_at: Instant) -> bool {
		self.ttl.is_none_or(|ttl| stored_at.elapsed() < ttl)
	}
}

#[async_trait]
impl VerificationCache for InMemoryCache {
	async fn get(&self, key: &str) -> Option<Value> {
		let entries = self.entries.read().await;
		let (value, stored_at) = entries.get(key)?;
		self.is_fresh(*stored_at).then(|| value.clone())
	}

	async fn set(&self, key: &str, value: Value) {
		self.entries
			.write()
			.await
			.insert(key.to_string(), (value, Instant::now()));
	}
}

/// Cache key builders. EVM addresses are lowercased.
pub mod keys {
	use super::U256;

	pub fn erc721_owner(chain_id: u64, contract: &str, token_id: U256, owner: &str) -> String {
		format!(
			"erc721:owner:{}:{}:{}:{}",
			chain_id,
			contract.to_lowercase(),
			token_id,
			owner.to_lowercase()
		)
	}

	pub fn erc721_balance(chain_id: u64, contract: &str, owner: &str) -> String {
		format!(
			"erc721:balance:{}:{}:{}",
			chain_id,
			contract.to_lowercase(),
			owner.to_lowercase()
		)
	}

	pub fn erc1155_balance(chain_id: u64, contract: &str, token_id: U256, owner: &str) -> String {
		format!(
			"erc1155:balance:{}:{}:{}:{}",
			chain_id,
			contract.to_lowercase(),
			token_id,
			owner.to_lowercase()
		)
	}

	pub fn metaplex_owner(chain_id: u64, mint: &str, owner: &str) -> String {
		format!("metaplex:owner:{}:{}:{}", chain_id, mint, owner)
	}

	pub fn metaplex_metadata(chain_id: u64, mint: &str) -> String {
		format!("metaplex:metadata:{}:{}", chain_id, mint)
	}
}
