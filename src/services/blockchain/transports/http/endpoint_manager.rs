//! Rotation between a primary RPC endpoint and its fallbacks.
//!
//! Requests always go to the active URL. A network failure, or a status listed in
//! [`ROTATE_ON_ERROR_CODES`], promotes the first reachable fallback and the request
//! is sent again. The previous active URL is moved to the back of the fallback list.
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware, RetryableStrategy};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::services::blockchain::transports::{
	RotatingTransport, TransportError, ROTATE_ON_ERROR_CODES,
};

#[derive(Clone, Debug)]
pub struct EndpointManager {
	pub active_url: Arc<RwLock<String>>,
	pub fallback_urls: Arc<RwLock<Vec<String>>>,
	client: ClientWithMiddleware,
	rotation_lock: Arc<tokio::sync::Mutex<()>>,
}

impl EndpointManager {
	pub fn new(client: ClientWithMiddleware, active_url: &str, fallback_urls: Vec<String>) -> Self {
		Self {
			active_url: Arc::new(RwLock::new(active_url.to_string())),
			fallback_urls: Arc::new(RwLock::new(fallback_urls)),
			rotation_lock: Arc::new(tokio::sync::Mutex::new(())),
			client,
		}
	}

	pub fn update_client(&mut self, client: ClientWithMiddleware) {
		self.client = client;
	}

	/// Rebuilds the HTTP client with a new retry policy and strategy
	pub fn set_retry_policy<R: RetryableStrategy + Send + Sync + 'static>(
		&mut self,
		retry_policy: ExponentialBackoff,
		retry_strategy: R,
	) {
		let updated_client = ClientBuilder::from_client(self.client.clone())
			.with(RetryTransientMiddleware::new_with_policy_and_strategy(
				retry_policy,
				retry_strategy,
			))
			.build();
		self.update_client(updated_client);
	}

	/// Promotes the first fallback URL that differs from the active one and accepts a connection
	pub async fn rotate_url<T: RotatingTransport>(
		&self,
		transport: &T,
	) -> Result<(), anyhow::Error> {
		let _guard = self.rotation_lock.lock().await;
		let current_active = self.active_url.read().await.clone();

		let candidate = {
			let mut fallback_urls = self.fallback_urls.write().await;
			match fallback_urls.iter().position(|url| url != &current_active) {
				Some(pos) => fallback_urls.remove(pos),
				None => return Err(anyhow::anyhow!("No fallback URLs available")),
			}
		};

		if let Err(e) = transport.try_connect(&candidate).await {
			self.fallback_urls.write().await.push(candidate);
			return Err(e.context("Failed to connect to fallback URL"));
		}

		transport.update_client(&candidate).await?;
		*self.active_url.write().await = candidate.clone();
		self.fallback_urls.write().await.push(current_active.clone());
		tracing::debug!(from = %current_active, to = %candidate, "Rotated RPC endpoint");
		Ok(())
	}

	/// Returns `Ok(true)` when a rotation happened and the request should be resent
	async fn try_rotate<T: RotatingTransport>(
		&self,
		transport: &T,
		status: Option<u16>,
	) -> Result<bool, TransportError> {
		let eligible = match status {
			Some(code) => ROTATE_ON_ERROR_CODES.contains(&code),
			None => true,
		};
		if !eligible || self.fallback_urls.read().await.is_empty() {
			return Ok(false);
		}

		self.rotate_url(transport)
			.await
			.map(|_| true)
			.map_err(|e| TransportError::url_rotation(e.to_string()))
	}

	/// Sends a request to the active endpoint, rotating on eligible failures
	///
	/// A response carrying a JSON-RPC `error` member is returned as
	/// [`TransportError::Rpc`]; any other successful response is returned whole.
	pub async fn send_raw_request<
		T: RotatingTransport,
		P: Into<Value> + Send + Clone + Serialize,
	>(
		&self,
		transport: &T,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError> {
		loop {
			let current_url = self.active_url.read().await.clone();
			let request_body = transport.customize_request(method, params.clone()).await;
			let body = serde_json::to_string(&request_body)
				.map_err(|e| TransportError::RequestSerialization(e.to_string()))?;

			let response = match self
				.client
				.post(current_url.as_str())
				.header("Content-Type", "application/json")
				.body(body)
				.send()
				.await
			{
				Ok(response) => response,
				Err(network_error) => {
					tracing::warn!(url = %current_url, method, "Network error: {}", network_error);
					if self.try_rotate(transport, None).await? {
						continue;
					}
					return Err(TransportError::network(network_error.to_string()));
				}
			};

			let status = response.status();
			if !status.is_success() {
				let error_body = response.text().await.unwrap_or_default();
				tracing::warn!(url = %current_url, method, status = status.as_u16(), "Request failed");
				if self.try_rotate(transport, Some(status.as_u16())).await? {
					continue;
				}
				return Err(TransportError::http(
					status.as_u16(),
					current_url,
					error_body,
				));
			}

			let json: Value = response
				.json()
				.await
				.map_err(|e| TransportError::ResponseParse(e.to_string()))?;

			if let Some(error) = json.get("error").filter(|e| !e.is_null()) {
				let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
				let message = error
					.get("message")
					.and_then(Value::as_str)
					.unwrap_or("unknown error");
				return Err(TransportError::rpc(code, message));
			}

			return Ok(json);
		}
	}
}
