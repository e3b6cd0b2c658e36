//! HTTP client construction with retry middleware.
//!
//! Used by the RPC transport and by the metadata document fetcher.

use anyhow::Context;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{
	policies::ExponentialBackoff, Jitter, RetryTransientMiddleware, RetryableStrategy,
};
use std::time::Duration;

/// Configuration for HTTP retry policies
#[derive(Debug, Clone)]
pub struct HttpRetryConfig {
	/// Maximum number of retries for transient errors
	pub max_retries: u32,
	/// Base duration for exponential backoff calculations
	pub base_for_backoff: u32,
	/// Initial backoff duration before the first retry
	pub initial_backoff: Duration,
	/// Maximum backoff duration for retries
	pub max_backoff: Duration,
	/// Jitter to apply to the backoff duration
	pub jitter: Jitter,
	/// Whole-request timeout of the underlying client
	pub request_timeout: Duration,
}

impl Default for HttpRetryConfig {
	fn default() -> Self {
		Self {
			max_retries: 3,
			base_for_backoff: 2,
			initial_backoff: Duration::from_millis(250),
			max_backoff: Duration::from_secs(10),
			jitter: Jitter::Full,
			request_timeout: Duration::from_secs(30),
		}
	}
}

impl HttpRetryConfig {
	/// Configuration that never retries
	pub fn no_retries() -> Self {
		Self {
			max_retries: 0,
			..Self::default()
		}
	}

	pub fn retry_policy(&self) -> ExponentialBackoff {
		ExponentialBackoff::builder()
			.base(self.base_for_backoff)
			.retry_bounds(self.initial_backoff, self.max_backoff)
			.jitter(self.jitter)
			.build_with_max_retries(self.max_retries)
	}
}

/// Wraps `base_client` with retry middleware
///
/// When `custom_strategy` is given it decides which failures are retried;
/// otherwise the default transient-error classification applies.
pub fn create_retryable_http_client<S>(
	config: &HttpRetryConfig,
	base_client: reqwest::Client,
	custom_strategy: Option<S>,
) -> ClientWithMiddleware
where
	S: RetryableStrategy + Send + Sync + 'static,
{
	let retry_policy = config.retry_policy();

	if let Some(strategy) = custom_strategy {
		ClientBuilder::new(base_client).with(
			RetryTransientMiddleware::new_with_policy_and_strategy(retry_policy, strategy),
		)
	} else {
		ClientBuilder::new(base_client)
			.with(RetryTransientMiddleware::new_with_policy(retry_policy))
	}
	.build()
}

/// Builds a fresh client with the configured timeout and retry middleware
pub fn create_http_client(config: &HttpRetryConfig) -> Result<ClientWithMiddleware, anyhow::Error> {
	let base_client = reqwest::ClientBuilder::new()
		.timeout(config.request_timeout)
		.build()
		.context("Failed to create HTTP client")?;

	Ok(create_retryable_http_client::<
		reqwest_retry::DefaultRetryableStrategy,
	>(config, base_client, None))
}
