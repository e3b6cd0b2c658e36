use std::sync::{
	atomic::{AtomicUsize, Ordering},
	Arc,
};

use futures::FutureExt;
use mockall::mock;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use serde::Serialize;
use serde_json::{json, Value};

use wallet_verifier::{
	models::ChainConfig,
	services::blockchain::{
		BlockChainError, BlockchainTransport, RotatingTransport, TransientErrorRetryStrategy,
		TransportConnector, TransportError,
	},
};

// Mock JSON-RPC transport shared by EVM and Solana clients.
// Requests are matched on method name and raw params.
mock! {
	pub RpcTransport {
		pub async fn send_raw_request(&self, method: &str, params: Option<Value>) -> Result<Value, TransportError>;
		pub async fn get_current_url(&self) -> String;
		pub async fn close(&self);
	}

	impl Clone for RpcTransport {
		fn clone(&self) -> Self;
	}
}

#[async_trait::async_trait]
impl BlockchainTransport for MockRpcTransport {
	async fn get_current_url(&self) -> String {
		self.get_current_url().await
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		self.send_raw_request(method, params.map(|p| p.into()))
			.await
	}

	fn set_retry_policy(
		&mut self,
		_: ExponentialBackoff,
		_: Option<TransientErrorRetryStrategy>,
	) -> Result<(), anyhow::Error> {
		Ok(())
	}

	fn update_endpoint_manager_client(
		&mut self,
		_: ClientWithMiddleware,
	) -> Result<(), anyhow::Error> {
		Ok(())
	}

	async fn close(&self) {
		self.close().await
	}
}

#[async_trait::async_trait]
impl RotatingTransport for MockRpcTransport {
	async fn try_connect(&self, _url: &str) -> Result<(), anyhow::Error> {
		Ok(())
	}

	async fn update_client(&self, _url: &str) -> Result<(), anyhow::Error> {
		Ok(())
	}
}

/// Wraps `result` in a JSON-RPC success envelope
pub fn rpc_result(result: Value) -> Value {
	json!({
		"jsonrpc": "2.0",
		"id": 1,
		"result": result
	})
}

/// Connector handing out fresh mocks prepared by `setup`.
///
/// Every mock accepts `close`; the returned counter tracks how many transports were closed.
pub fn mock_connector<F>(setup: F) -> (TransportConnector<MockRpcTransport>, Arc<AtomicUsize>)
where
	F: Fn(&ChainConfig, &mut MockRpcTransport) + Send + Sync + 'static,
{
	let closed = Arc::new(AtomicUsize::new(0));
	let counter = closed.clone();

	let connector: TransportConnector<MockRpcTransport> = Arc::new(move |chain: ChainConfig| {
		let mut transport = MockRpcTransport::new();
		let counter = counter.clone();
		transport.expect_close().returning(move || {
			counter.fetch_add(1, Ordering::SeqCst);
		});
		transport
			.expect_get_current_url()
			.returning(|| "http://mock-rpc".to_string());
		setup(&chain, &mut transport);
		async move { Ok::<_, BlockChainError>(transport) }.boxed()
	});

	(connector, closed)
}

/// One `jsonParsed` SPL token account entry as returned by `getProgramAccounts`
pub fn token_account_entry(address: &str, mint: &str, owner: &str, amount: u64) -> Value {
	json!({
		"pubkey": address,
		"account": {
			"data": {
				"parsed": {
					"info": {
						"mint": mint,
						"owner": owner,
						"tokenAmount": { "amount": amount.to_string(), "decimals": 0 }
					},
					"type": "account"
				},
				"program": "spl-token"
			},
			"owner": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
			"lamports": 2039280,
			"executable": false
		}
	})
}
