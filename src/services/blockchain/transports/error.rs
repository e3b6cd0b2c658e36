//! Transport error types.

use thiserror::Error;

/// Failures raised while moving a JSON-RPC request over the wire
#[derive(Debug, Error)]
pub enum TransportError {
	/// Endpoint answered with a non-success HTTP status
	#[error("HTTP error: status {status} from {url}: {body}")]
	Http { status: u16, url: String, body: String },

	/// Request could not be delivered
	#[error("Network error: {0}")]
	Network(String),

	/// Endpoint answered with a JSON-RPC error object
	#[error("RPC error {code}: {message}")]
	Rpc { code: i64, message: String },

	#[error("Failed to serialize request: {0}")]
	RequestSerialization(String),

	#[error("Failed to parse response: {0}")]
	ResponseParse(String),

	/// Switching to a fallback endpoint failed
	#[error("URL rotation failed: {0}")]
	UrlRotation(String),

	/// Transport was closed by its owner
	#[error("Transport closed")]
	Closed,
}

impl TransportError {
	pub fn http(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
		let error = Self::Http {
			status,
			url: url.into(),
			body: body.into(),
		};
		tracing::error!("{}", error);
		error
	}

	pub fn network(msg: impl Into<String>) -> Self {
		let error = Self::Network(msg.into());
		tracing::error!("{}", error);
		error
	}

	pub fn rpc(code: i64, message: impl Into<String>) -> Self {
		let error = Self::Rpc {
			code,
			message: message.into(),
		};
		tracing::error!("{}", error);
		error
	}

	pub fn url_rotation(msg: impl Into<String>) -> Self {
		let error = Self::UrlRotation(msg.into());
		tracing::error!("{}", error);
		error
	}
}
