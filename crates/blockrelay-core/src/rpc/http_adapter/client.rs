use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, trace};

use crate::error::{CoreError, RpcError};
use crate::hex_quantity;
use crate::types::Block;

use super::super::BlockchainRpc;
use super::connection::resolve_endpoint;
use super::parsing::{is_missing_block, parse_block_number_result, parse_block_result};
use super::protocol::{invalid_response, JsonRpcRequest, JsonRpcResponse};

/// Public Polygon mainnet endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://polygon-rpc.com";

/// Upper bound on a single RPC exchange, connect included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Ethereum JSON-RPC client over HTTP(S).
///
/// Holds no mutable state besides the request-id counter and the
/// connection pool inside `reqwest::Client`, so one instance can be
/// shared across tasks.
pub struct HttpRpcClient {
    client: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    /// Create a client for `endpoint`, or for [`DEFAULT_ENDPOINT`] when
    /// `None` or empty, with the [`DEFAULT_TIMEOUT`].
    pub fn new(endpoint: Option<&str>) -> Result<Self, CoreError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: Option<&str>, timeout: Duration) -> Result<Self, CoreError> {
        if timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "rpc timeout must be greater than zero".to_owned(),
            ));
        }
        let endpoint = resolve_endpoint(endpoint)?;

        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn rpc_call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        let id = self.next_request_id();
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = params.len(),
            "rpc call"
        );
        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        // reqwest errors render the request URL, which may carry an API key.
        let transport = |source: reqwest::Error| RpcError::Transport {
            method: method.to_owned(),
            source: source.without_url(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();

        let body = response.text().await.map_err(transport)?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        if !status.is_success() {
            return Err(RpcError::HttpStatus {
                method: method.to_owned(),
                status: status.as_u16(),
                body: truncate_body(&body),
            }
            .into());
        }

        let decoded: JsonRpcResponse = serde_json::from_str(&body).map_err(|e| {
            invalid_response(method, format!(
                "decode JSON-RPC response: {e}; body={}",
                truncate_body(&body)
            ))
        })?;

        decoded.into_result(method, id)
    }
}

/// Longest prefix of a node response body kept in error messages.
const MAX_ERROR_BODY_BYTES: usize = 512;

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body.to_owned();
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes total)", &body[..end], body.len())
}

#[async_trait]
impl BlockchainRpc for HttpRpcClient {
    async fn get_block_number(&self) -> Result<u64, CoreError> {
        const METHOD: &str = "eth_blockNumber";
        let raw = self.rpc_call(METHOD, Vec::new()).await?;
        parse_block_number_result(METHOD, raw)
    }

    async fn get_block_by_number(&self, number: u64) -> Result<Block, CoreError> {
        const METHOD: &str = "eth_getBlockByNumber";
        // `true` asks for full transaction objects instead of hashes.
        let raw = self
            .rpc_call(
                METHOD,
                vec![
                    serde_json::json!(hex_quantity::encode(number)),
                    serde_json::json!(true),
                ],
            )
            .await?;

        if is_missing_block(&raw) {
            debug!(block = number, "node returned no block");
            return Err(CoreError::BlockNotFound(number));
        }
        parse_block_result(METHOD, raw)
    }
}
