use mockito::Server;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::{
	atomic::{AtomicBool, Ordering},
	Arc,
};
use tokio::sync::RwLock;

use wallet_verifier::services::blockchain::{
	BlockchainTransport, EndpointManager, RotatingTransport, TransientErrorRetryStrategy,
	TransportError,
};

// Transport stand-in that records the URL it was switched to
#[derive(Clone)]
struct MockTransport {
	current_url: Arc<RwLock<String>>,
	refuse_connections: Arc<AtomicBool>,
}

impl MockTransport {
	fn new() -> Self {
		Self {
			current_url: Arc::new(RwLock::new(String::new())),
			refuse_connections: Arc::new(AtomicBool::new(false)),
		}
	}

	fn refusing() -> Self {
		let transport = Self::new();
		transport.refuse_connections.store(true, Ordering::SeqCst);
		transport
	}
}

#[async_trait::async_trait]
impl BlockchainTransport for MockTransport {
	async fn get_current_url(&self) -> String {
		self.current_url.read().await.clone()
	}

	async fn send_raw_request<P: Into<Value> + Send + Clone + Serialize>(
		&self,
		_method: &str,
		_params: Option<P>,
	) -> Result<Value, TransportError> {
		Ok(json!({ "jsonrpc": "2.0", "result": "mocked_response", "id": 1 }))
	}

	fn set_retry_policy(
		&mut self,
		_retry_policy: ExponentialBackoff,
		_retry_strategy: Option<TransientErrorRetryStrategy>,
	) -> Result<(), anyhow::Error> {
		Ok(())
	}

	fn update_endpoint_manager_client(
		&mut self,
		_: ClientWithMiddleware,
	) -> Result<(), anyhow::Error> {
		Ok(())
	}
}

#[async_trait::async_trait]
impl RotatingTransport for MockTransport {
	async fn try_connect(&self, url: &str) -> Result<(), anyhow::Error> {
		if self.refuse_connections.load(Ordering::SeqCst) {
			return Err(anyhow::anyhow!("Failed to connect: {}", url));
		}
		Ok(())
	}

	async fn update_client(&self, url: &str) -> Result<(), anyhow::Error> {
		*self.current_url.write().await = url.to_string();
		Ok(())
	}
}

fn get_mock_client_builder() -> ClientWithMiddleware {
	ClientBuilder::new(reqwest::Client::new()).build()
}

const SUCCESS_BODY: &str = r#"{"jsonrpc": "2.0", "result": "success", "id": 1}"#;

#[tokio::test]
async fn test_endpoint_rotation() {
	let server1 = Server::new_async().await;
	let server2 = Server::new_async().await;
	let server3 = Server::new_async().await;

	let manager = EndpointManager::new(
		get_mock_client_builder(),
		server1.url().as_ref(),
		vec![server2.url(), server3.url()],
	);
	let transport = MockTransport::new();

	assert_eq!(&*manager.active_url.read().await, &server1.url());
	assert_eq!(
		&*manager.fallback_urls.read().await,
		&vec![server2.url(), server3.url()]
	);

	manager.rotate_url(&transport).await.unwrap();
	assert_eq!(&*manager.active_url.read().await, &server2.url());
	assert_eq!(transport.get_current_url().await, server2.url());
	// The previous active URL goes to the back of the list
	assert_eq!(
		&*manager.fallback_urls.read().await,
		&vec![server3.url(), server1.url()]
	);
}

#[tokio::test]
async fn test_rotation_keeps_candidate_when_connect_fails() {
	let server1 = Server::new_async().await;
	let server2 = Server::new_async().await;

	let manager = EndpointManager::new(
		get_mock_client_builder(),
		server1.url().as_ref(),
		vec![server2.url()],
	);

	let result = manager.rotate_url(&MockTransport::refusing()).await;
	assert!(result.is_err());
	assert_eq!(&*manager.active_url.read().await, &server1.url());
	assert_eq!(&*manager.fallback_urls.read().await, &vec![server2.url()]);
}

#[tokio::test]
async fn test_send_raw_request() {
	let mut server = Server::new_async().await;

	let mock = server
		.mock("POST", "/")
		.match_body(mockito::Matcher::PartialJson(json!({
			"method": "eth_gasPrice"
		})))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(SUCCESS_BODY)
		.create_async()
		.await;

	let manager = EndpointManager::new(get_mock_client_builder(), server.url().as_ref(), vec![]);
	let transport = MockTransport::new();

	let result = manager
		.send_raw_request(&transport, "eth_gasPrice", None::<Value>)
		.await
		.unwrap();

	assert_eq!(result["result"], "success");
	mock.assert();
}

#[tokio::test]
async fn test_rotation_on_rate_limit() {
	let mut primary_server = Server::new_async().await;
	let mut fallback_server = Server::new_async().await;

	let primary_mock = primary_server
		.mock("POST", "/")
		.with_status(429)
		.with_body("Rate limited")
		.expect(1)
		.create_async()
		.await;

	let fallback_mock = fallback_server
		.mock("POST", "/")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(SUCCESS_BODY)
		.create_async()
		.await;

	let manager = EndpointManager::new(
		get_mock_client_builder(),
		primary_server.url().as_ref(),
		vec![fallback_server.url()],
	);
	let transport = MockTransport::new();

	let result = manager
		.send_raw_request(&transport, "getHealth", Some(json!([])))
		.await
		.unwrap();

	assert_eq!(result["result"], "success");
	primary_mock.assert();
	fallback_mock.assert();
	assert_eq!(&*manager.active_url.read().await, &fallback_server.url());
}

#[tokio::test]
async fn test_rate_limit_without_fallbacks() {
	let mut server = Server::new_async().await;

	let mock = server
		.mock("POST", "/")
		.with_status(429)
		.with_body("Rate limited")
		.expect(1)
		.create_async()
		.await;

	let manager = EndpointManager::new(get_mock_client_builder(), server.url().as_ref(), vec![]);
	let result = manager
		.send_raw_request(&MockTransport::new(), "eth_call", Some(json!([])))
		.await;

	match result {
		Err(TransportError::Http { status, body, .. }) => {
			assert_eq!(status, 429);
			assert_eq!(body, "Rate limited");
		}
		other => panic!("Expected HTTP error, got {:?}", other),
	}
	mock.assert();
}

#[tokio::test]
async fn test_server_error_does_not_rotate() {
	let mut primary_server = Server::new_async().await;
	let mut fallback_server = Server::new_async().await;

	let primary_mock = primary_server
		.mock("POST", "/")
		.with_status(500)
		.with_body("Internal error")
		.expect(1)
		.create_async()
		.await;

	let fallback_mock = fallback_server
		.mock("POST", "/")
		.expect(0)
		.create_async()
		.await;

	let manager = EndpointManager::new(
		get_mock_client_builder(),
		primary_server.url().as_ref(),
		vec![fallback_server.url()],
	);

	let result = manager
		.send_raw_request(&MockTransport::new(), "eth_call", Some(json!([])))
		.await;

	assert!(matches!(result, Err(TransportError::Http { status: 500, .. })));
	primary_mock.assert();
	fallback_mock.assert();
	assert_eq!(&*manager.active_url.read().await, &primary_server.url());
}

#[tokio::test]
async fn test_network_error_rotates() {
	let mut fallback_server = Server::new_async().await;

	let fallback_mock = fallback_server
		.mock("POST", "/")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(SUCCESS_BODY)
		.create_async()
		.await;

	let manager = EndpointManager::new(
		get_mock_client_builder(),
		"http://127.0.0.1:1",
		vec![fallback_server.url()],
	);

	let result = manager
		.send_raw_request(&MockTransport::new(), "eth_blockNumber", None::<Value>)
		.await
		.unwrap();

	assert_eq!(result["result"], "success");
	fallback_mock.assert();
	assert_eq!(&*manager.active_url.read().await, &fallback_server.url());
}

#[tokio::test]
async fn test_json_rpc_error_is_reported() {
	let mut server = Server::new_async().await;

	let _mock = server
		.mock("POST", "/")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			r#"{"jsonrpc": "2.0", "id": 1, "error": {"code": -32000, "message": "execution reverted"}}"#,
		)
		.create_async()
		.await;

	let manager = EndpointManager::new(get_mock_client_builder(), server.url().as_ref(), vec![]);
	let result = manager
		.send_raw_request(&MockTransport::new(), "eth_call", Some(json!([])))
		.await;

	match result {
		Err(TransportError::Rpc { code, message }) => {
			assert_eq!(code, -32000);
			assert_eq!(message, "execution reverted");
		}
		other => panic!("Expected RPC error, got {:?}", other),
	}
}

#[tokio::test]
async fn test_unparsable_response() {
	let mut server = Server::new_async().await;

	let _mock = server
		.mock("POST", "/")
		.with_status(200)
		.with_body("not json")
		.create_async()
		.await;

	let manager = EndpointManager::new(get_mock_client_builder(), server.url().as_ref(), vec![]);
	let result = manager
		.send_raw_request(&MockTransport::new(), "eth_call", Some(json!([])))
		.await;

	assert!(matches!(result, Err(TransportError::ResponseParse(_))));
}
