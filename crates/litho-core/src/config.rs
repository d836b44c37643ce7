use std::time::Duration;

use crate::error::LithoError;
use crate::network::{NetworkIdentity, NetworkName};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);

// ==============================================================================
// Retry Config
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Additional attempts after the first one.
    pub count: u32,
    /// Base backoff; the k-th retry waits `delay * k`.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_RETRY_COUNT,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

// ==============================================================================
// Client Config
// ==============================================================================

/// Everything a [`crate::LithoClient`] needs, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub rpc_url: String,
    /// Chain id known up front. When `None`, `get_chain_id` asks the node.
    pub chain_id: Option<u64>,
    /// Hard deadline for a single HTTP exchange.
    pub timeout: Duration,
    pub retry: RetryConfig,
    /// Optional cap on outbound requests per second.
    pub requests_per_second: Option<u32>,
}

impl ClientConfig {
    /// Resolve a network label (`mainnet`, `staging`, `devnet`, `local`) or a
    /// custom RPC URL into a config with default timeout and retry settings.
    ///
    /// A label brings its RPC URL and chain id. Anything else must start with
    /// `http` and runs without a known chain id.
    pub fn new(rpc_url_or_network: &str) -> Result<Self, LithoError> {
        if let Ok(name) = rpc_url_or_network.parse::<NetworkName>() {
            return Ok(Self::for_network(NetworkIdentity::by_name(name)));
        }

        if !rpc_url_or_network.starts_with("http") {
            return Err(LithoError::invalid_parameter(format!(
                "Invalid RPC URL: {rpc_url_or_network}. Must start with http:// or https://"
            )));
        }

        Ok(Self {
            rpc_url: rpc_url_or_network.to_owned(),
            chain_id: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            requests_per_second: None,
        })
    }

    pub fn for_network(network: &NetworkIdentity) -> Self {
        Self {
            rpc_url: network.rpc_url.to_owned(),
            chain_id: Some(network.chain_id),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            requests_per_second: None,
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, count: u32, delay: Duration) -> Self {
        self.retry = RetryConfig { count, delay };
        self
    }

    pub fn with_requests_per_second(mut self, limit: u32) -> Self {
        self.requests_per_second = Some(limit);
        self
    }
}
