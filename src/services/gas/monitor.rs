//! Background gas price monitor.
//!
//! Fetches the price once on start, then re-polls on a fixed interval until
//! stopped. The latest snapshot sits behind a read/write lock; a failed poll
//! is logged and the previous snapshot is kept.
//!
//! Stopping is cooperative: the stop signal is looked at between polls, so an
//! in-flight RPC call always completes.

use std::{sync::Arc, time::Duration};

use alloy::primitives::U256;
use tokio::{
	sync::{watch, Mutex, RwLock},
	task::JoinHandle,
	time::MissedTickBehavior,
};

use crate::{
	models::{GasPriceLevel, GasPriceSnapshot, GasTier},
	services::{
		blockchain::{BlockchainTransport, ChainClientManager, EvmClient, EvmClientTrait},
		gas::GasError,
	},
	utils::constants::DEFAULT_GAS_POLL_INTERVAL,
};

const WEI_PER_NATIVE: f64 = 1e18;

/// Keeps the gas price of one EVM chain fresh
pub struct GasPriceMonitor<C: EvmClientTrait + 'static> {
	chain_id: u64,
	client: Arc<C>,
	interval: Duration,
	snapshot: Arc<RwLock<Option<GasPriceSnapshot>>>,
	shutdown_tx: watch::Sender<bool>,
	handle: Mutex<Option<JoinHandle<()>>>,
}

impl<T> GasPriceMonitor<EvmClient<T>>
where
	T: BlockchainTransport + Send + Sync + Clone + 'static,
{
	/// Monitor for a chain already added to `manager`
	pub async fn from_manager(
		manager: &ChainClientManager<T>,
		chain_id: u64,
	) -> Result<Self, GasError> {
		let client = manager.get_client(chain_id).await?.as_evm()?;
		Ok(Self::new(chain_id, client))
	}
}

impl<C: EvmClientTrait + 'static> GasPriceMonitor<C> {
	pub fn new(chain_id: u64, client: Arc<C>) -> Self {
		Self::with_interval(chain_id, client, DEFAULT_GAS_POLL_INTERVAL)
	}

	pub fn with_interval(chain_id: u64, client: Arc<C>, interval: Duration) -> Self {
		let (shutdown_tx, _) = watch::channel(false);
		Self {
			chain_id,
			client,
			interval,
			snapshot: Arc::new(RwLock::new(None)),
			shutdown_tx,
			handle: Mutex::new(None),
		}
	}

	pub fn chain_id(&self) -> u64 {
		self.chain_id
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Fetches the initial price and spawns the polling task.
	///
	/// Calling `start` on a running monitor does nothing.
	pub async fn start(&self) {
		let mut handle = self.handle.lock().await;
		if handle.as_ref().is_some_and(|h| !h.is_finished()) {
			tracing::debug!(chain_id = self.chain_id, "Gas monitor already running");
			return;
		}

		poll_once(self.chain_id, self.client.as_ref(), &self.snapshot).await;

		self.shutdown_tx.send_replace(false);
		let mut shutdown_rx = self.shutdown_tx.subscribe();
		let chain_id = self.chain_id;
		let client = self.client.clone();
		let snapshot = self.snapshot.clone();
		let period = self.interval;

		*handle = Some(tokio::spawn(async move {
			let mut ticker = tokio::time::interval(period);
			ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
			// The first tick completes immediately and the initial poll already ran
			ticker.tick().await;

			loop {
				tokio::select! {
					_ = ticker.tick() => {
						poll_once(chain_id, client.as_ref(), &snapshot).await;
					}
					_ = shutdown_rx.changed() => {
						break;
					}
				}
			}
			tracing::info!(chain_id = chain_id, "Gas monitor stopped");
		}));

		tracing::info!(
			chain_id = self.chain_id,
			interval_secs = self.interval.as_secs(),
			"Gas monitor started"
		);
	}

	/// Signals the polling task and waits for it to finish
	pub async fn stop(&self) {
		let handle = self.handle.lock().await.take();
		let Some(handle) = handle else {
			return;
		};

		self.shutdown_tx.send_replace(true);
		if let Err(e) = handle.await {
			tracing::error!(chain_id = self.chain_id, error = %e, "Gas monitor task failed");
		}
	}

	pub async fn is_running(&self) -> bool {
		self.handle
			.lock()
			.await
			.as_ref()
			.is_some_and(|h| !h.is_finished())
	}

	/// Polls once and stores the result
	pub async fn refresh(&self) -> Result<GasPriceSnapshot, GasError> {
		let wei_price = self.client.gas_price().await?;
		let snapshot = GasPriceSnapshot::new(self.chain_id, wei_price);
		*self.snapshot.write().await = Some(snapshot);
		Ok(snapshot)
	}

	/// Latest snapshot, `None` before the first successful poll
	pub async fn snapshot(&self) -> Option<GasPriceSnapshot> {
		*self.snapshot.read().await
	}

	pub async fn gas_price_wei(&self) -> Option<u128> {
		self.snapshot().await.map(|s| s.wei_price)
	}

	pub async fn gas_price_gwei(&self) -> Option<f64> {
		self.snapshot().await.map(|s| s.gwei_price())
	}

	/// Cost of `gas` units in wei
	pub async fn estimate_cost(&self, gas: u64) -> Option<U256> {
		self.snapshot().await.map(|s| s.estimate_cost(gas))
	}

	/// Cost of `gas` units in whole native tokens
	pub async fn estimate_cost_in_native(&self, gas: u64) -> Option<f64> {
		self.snapshot()
			.await
			.map(|s| s.wei_price as f64 * gas as f64 / WEI_PER_NATIVE)
	}

	/// Safe, standard and fast tiers, empty before the first successful poll
	pub async fn gas_price_levels(&self) -> Vec<GasPriceLevel> {
		match self.snapshot().await {
			Some(snapshot) => GasTier::ALL
				.iter()
				.map(|tier| GasPriceLevel::from_snapshot(*tier, &snapshot))
				.collect(),
			None => Vec::new(),
		}
	}
}

async fn poll_once<C: EvmClientTrait + ?Sized>(
	chain_id: u64,
	client: &C,
	snapshot: &RwLock<Option<GasPriceSnapshot>>,
) {
	match client.gas_price().await {
		Ok(wei_price) => {
			*snapshot.write().await = Some(GasPriceSnapshot::new(chain_id, wei_price));
			tracing::debug!(chain_id = chain_id, wei_price = wei_price, "Gas price updated");
		}
		Err(e) => {
			tracing::error!(chain_id = chain_id, error = %e, "Gas price poll failed, keeping last value");
		}
	}
}
