//! Chain client manager.
//!
//! Owns one live client per connected chain id. Chains are connected and
//! disconnected only through explicit `add_chain` / `remove_chain` calls; a
//! failed or closed client is never replaced behind the caller's back.
//!
//! The client table sits behind a `tokio` RwLock: lookups take the shared lock,
//! add and remove take the exclusive one.

use std::{collections::HashMap, sync::Arc};

use futures::{future::BoxFuture, FutureExt};
use tokio::sync::RwLock;

use crate::{
	models::ChainConfig,
	repositories::ChainRegistry,
	services::blockchain::{
		client::ChainClient,
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
};

/// Opens a transport for a chain configuration
pub type TransportConnector<T> =
	Arc<dyn Fn(ChainConfig) -> BoxFuture<'static, Result<T, BlockChainError>> + Send + Sync>;

/// Registry-backed table of live chain clients keyed by chain id
pub struct ChainClientManager<T: Send + Sync + Clone = HttpTransportClient> {
	registry: Arc<ChainRegistry>,
	clients: Arc<RwLock<HashMap<u64, Arc<ChainClient<T>>>>>,
	connector: TransportConnector<T>,
}

impl ChainClientManager<HttpTransportClient> {
	/// Creates a manager that connects over HTTP JSON-RPC
	pub fn new(registry: Arc<ChainRegistry>) -> Self {
		Self::with_connector(
			registry,
			Arc::new(|chain: ChainConfig| {
				async move {
					HttpTransportClient::new(&chain).await.map_err(|e| {
						BlockChainError::connection_error(format!(
							"Failed to connect to chain {}: {}",
							chain.id, e
						))
					})
				}
				.boxed()
			}),
		)
	}
}

impl<T> ChainClientManager<T>
where
	T: BlockchainTransport + Send + Sync + Clone + 'static,
{
	/// Creates a manager that opens transports through `connector`
	pub fn with_connector(registry: Arc<ChainRegistry>, connector: TransportConnector<T>) -> Self {
		Self {
			registry,
			clients: Arc::new(RwLock::new(HashMap::new())),
			connector,
		}
	}

	pub fn registry(&self) -> &ChainRegistry {
		&self.registry
	}

	/// Resolves `chain_id` in the registry, connects, and stores the client.
	///
	/// Adding a chain that is already connected returns the existing client.
	pub async fn add_chain(&self, chain_id: u64) -> Result<Arc<ChainClient<T>>, BlockChainError> {
		if let Some(client) = self.clients.read().await.get(&chain_id) {
			tracing::debug!(chain_id = chain_id, "Chain already connected");
			return Ok(client.clone());
		}

		let chain = self
			.registry
			.get(chain_id)
			.ok_or_else(|| BlockChainError::chain_not_supported(chain_id))?;
		let transport = (self.connector)(chain.clone()).await?;
		let client = Arc::new(ChainClient::from_transport(transport, chain.clone()));

		let mut clients = self.clients.write().await;
		if let Some(existing) = clients.get(&chain_id) {
			// Lost a race with a concurrent add for the same id
			let existing = existing.clone();
			drop(clients);
			client.close().await;
			return Ok(existing);
		}
		clients.insert(chain_id, client.clone());
		drop(clients);

		tracing::info!(chain_id = chain_id, name = %chain.name, "Connected chain");
		Ok(client)
	}

	/// Closes and evicts the client for `chain_id`
	pub async fn remove_chain(&self, chain_id: u64) -> Result<(), BlockChainError> {
		let client = self
			.clients
			.write()
			.await
			.remove(&chain_id)
			.ok_or_else(|| BlockChainError::chain_not_connected(chain_id))?;

		client.close().await;
		tracing::info!(chain_id = chain_id, "Removed chain");
		Ok(())
	}

	/// The live client for `chain_id`
	pub async fn get_client(&self, chain_id: u64) -> Result<Arc<ChainClient<T>>, BlockChainError> {
		self.clients
			.read()
			.await
			.get(&chain_id)
			.cloned()
			.ok_or_else(|| BlockChainError::chain_not_connected(chain_id))
	}

	pub async fn is_connected(&self, chain_id: u64) -> bool {
		self.clients.read().await.contains_key(&chain_id)
	}

	/// Ids of all connected chains in ascending order
	pub async fn connected_chains(&self) -> Vec<u64> {
		let mut ids: Vec<u64> = self.clients.read().await.keys().copied().collect();
		ids.sort_unstable();
		ids
	}

	/// Closes every client and empties the table
	pub async fn close(&self) {
		let clients: Vec<_> = self.clients.write().await.drain().collect();
		for (chain_id, client) in clients {
			client.close().await;
			tracing::debug!(chain_id = chain_id, "Closed chain client");
		}
		tracing::info!("Chain client manager closed");
	}
}
