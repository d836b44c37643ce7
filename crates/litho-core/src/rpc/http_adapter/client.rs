use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{header, Url};
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::{LithoError, RpcError};

use super::super::Transport;
use super::connection::{parse_connection, parse_rate_limit};
use super::protocol::{interpret_response, JsonRpcRequest};

/// Upper bound on TCP/TLS connection setup; the per-call deadline still
/// applies on top of it.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// JSON-RPC 2.0 transport over HTTP(S).
///
/// Each [`Transport::call`] is one POST bounded by a hard deadline: when the
/// deadline expires the in-flight request is dropped and the call fails with
/// [`RpcError::Timeout`], whether or not a response would have arrived.
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
    timeout: Duration,
    limiter: Option<DirectRateLimiter>,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Build a transport for `config.rpc_url` using `config.timeout` as the
    /// per-call deadline.
    ///
    /// If `config.requests_per_second` is set, outbound calls wait for the
    /// rate limiter before being sent; the wait is not counted against the
    /// deadline.
    pub fn new(config: &ClientConfig) -> Result<Self, LithoError> {
        let url = parse_connection(&config.rpc_url)?;
        let limiter = parse_rate_limit(config.requests_per_second)?
            .map(|limit| RateLimiter::direct(Quota::per_second(limit)));

        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                LithoError::from(RpcError::Transport(e)).context("failed to build HTTP client")
            })?;

        Ok(Self {
            client,
            url,
            timeout: config.timeout,
            limiter,
            next_id: AtomicU64::new(initial_request_id()),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    async fn exchange(
        &self,
        id: u64,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcError> {
        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await?;
        let status = response.status();

        let body = response.text().await?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        interpret_response(status, &body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcError> {
        self.wait_for_rate_limit().await;
        let id = self.next_request_id();
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = params.len(),
            "rpc call"
        );

        // The deadline covers connect, send and body read. Dropping the
        // exchange future on expiry aborts the request.
        match tokio::time::timeout(self.timeout, self.exchange(id, method, params)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(rpc.id = id, rpc.method = method, timeout_ms = self.timeout.as_millis() as u64, "rpc deadline expired");
                Err(RpcError::Timeout(self.timeout))
            }
        }
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1)
}
