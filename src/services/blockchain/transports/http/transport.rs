//! HTTP transport implementation for blockchain interactions.
//!
//! A JSON-RPC client bound to one chain. On construction it health-checks the chain's
//! endpoints in order with a family-specific health call and keeps the first one
//! that answers; the remaining endpoints become fallbacks for rotation.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use serde::Serialize;
use serde_json::{json, Value};
use std::{
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
	time::Duration,
};
use url::Url;

use crate::{
	models::{ChainConfig, ChainFamily},
	services::blockchain::transports::{
		BlockchainTransport, EndpointManager, RotatingTransport, TransientErrorRetryStrategy,
		TransportError,
	},
	utils::http::{create_retryable_http_client, HttpRetryConfig},
};

/// JSON-RPC transport over HTTP
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	/// Plain client used for connection health checks
	pub client: Arc<Client>,
	endpoint_manager: EndpointManager,
	health_method: &'static str,
	closed: Arc<AtomicBool>,
}

/// Health check method for a chain family
fn health_method(family: ChainFamily) -> &'static str {
	match family {
		ChainFamily::Evm => "net_version",
		ChainFamily::Solana => "getHealth",
	}
}

impl HttpTransportClient {
	/// Connects with the default retry configuration
	pub async fn new(chain: &ChainConfig) -> Result<Self, anyhow::Error> {
		Self::with_retry_config(chain, &HttpRetryConfig::default()).await
	}

	/// Health-checks the chain's endpoints in order and binds to the first reachable one
	pub async fn with_retry_config(
		chain: &ChainConfig,
		retry_config: &HttpRetryConfig,
	) -> Result<Self, anyhow::Error> {
		let http_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.timeout(Duration::from_secs(30))
			.connect_timeout(Duration::from_secs(20))
			.build()
			.context("Failed to create HTTP client")?;

		let client = create_retryable_http_client(
			retry_config,
			http_client.clone(),
			Some(TransientErrorRetryStrategy),
		);

		let method = health_method(chain.family);
		let endpoints = chain.rpc_endpoints();

		for endpoint in endpoints.iter() {
			if Url::parse(endpoint).is_err() {
				tracing::warn!(chain_id = chain.id, url = %endpoint, "Skipping malformed RPC URL");
				continue;
			}

			if health_check(&http_client, endpoint, method).await.is_err() {
				tracing::debug!(chain_id = chain.id, url = %endpoint, "RPC endpoint unreachable");
				continue;
			}

			let fallback_urls: Vec<String> = endpoints
				.iter()
				.filter(|url| *url != endpoint)
				.cloned()
				.collect();

			return Ok(Self {
				client: Arc::new(http_client),
				endpoint_manager: EndpointManager::new(client, endpoint, fallback_urls),
				health_method: method,
				closed: Arc::new(AtomicBool::new(false)),
			});
		}

		Err(anyhow::anyhow!(
			"All RPC URLs failed to connect for chain {}",
			chain.id
		))
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}
}

async fn health_check(client: &Client, url: &str, method: &str) -> Result<(), anyhow::Error> {
	let request = json!({
		"jsonrpc": "2.0",
		"id": 1,
		"method": method,
		"params": []
	});

	let response = client
		.post(url)
		.json(&request)
		.send()
		.await
		.with_context(|| format!("Failed to connect to {}", url))?;

	if !response.status().is_success() {
		return Err(anyhow::anyhow!(
			"Failed to connect to {}: {}",
			url,
			response.status().as_u16()
		));
	}
	Ok(())
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	async fn get_current_url(&self) -> String {
		self.endpoint_manager.active_url.read().await.clone()
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		if self.is_closed() {
			return Err(TransportError::Closed);
		}

		self.endpoint_manager
			.send_raw_request(self, method, params)
			.await
	}

	fn set_retry_policy(
		&mut self,
		retry_policy: ExponentialBackoff,
		retry_strategy: Option<TransientErrorRetryStrategy>,
	) -> Result<(), anyhow::Error> {
		self.endpoint_manager
			.set_retry_policy(retry_policy, retry_strategy.unwrap_or_default());
		Ok(())
	}

	fn update_endpoint_manager_client(
		&mut self,
		client: ClientWithMiddleware,
	) -> Result<(), anyhow::Error> {
		self.endpoint_manager.update_client(client);
		Ok(())
	}

	async fn close(&self) {
		if !self.closed.swap(true, Ordering::SeqCst) {
			let url = self.get_current_url().await;
			tracing::debug!(url = %url, "Closed HTTP transport");
		}
	}
}

#[async_trait]
impl RotatingTransport for HttpTransportClient {
	async fn try_connect(&self, url: &str) -> Result<(), anyhow::Error> {
		Url::parse(url).map_err(|_| anyhow::anyhow!("Invalid URL: {}", url))?;
		health_check(&self.client, url, self.health_method).await
	}

	async fn update_client(&self, url: &str) -> Result<(), anyhow::Error> {
		let parsed_url = Url::parse(url).map_err(|_| anyhow::anyhow!("Invalid URL: {}", url))?;
		let normalized_url = parsed_url.as_str().trim_end_matches('/');

		*self.endpoint_manager.active_url.write().await = normalized_url.to_string();
		Ok(())
	}
}
