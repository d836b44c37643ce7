//! High-level read client for a Lithosphere (EVM-compatible) node.
//!
//! [`LithoClient`] validates inputs, sends typed JSON-RPC requests through a
//! [`Transport`] wrapped in the configured [`RetryPolicy`], and decodes the
//! results into the domain types in [`crate::types`].

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::decode::format_units;
use crate::error::LithoError;
use crate::network::{Currency, NetworkIdentity, NATIVE_CURRENCY};
use crate::rpc::methods::{
    BlockNumber, ChainId, GetBalance, GetTransactionByHash, GetTransactionReceipt,
};
use crate::rpc::{HttpTransport, RetryPolicy, RpcMethod, Transport};
use crate::types::{AccountBalance, CallOptions, TransactionReceipt, TransactionResponse};
use crate::validate::{validate_address, validate_hash};

// ==============================================================================
// Wait Options
// ==============================================================================

/// Controls for [`LithoClient::wait_for_transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Required confirmations, counting the receipt's own block.
    pub confirmations: u64,
    /// Wall-clock budget for the whole wait.
    pub timeout: Duration,
    /// Pause between polls.
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(2),
        }
    }
}

impl WaitOptions {
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

enum WaitState {
    Polling,
    Confirmed(TransactionReceipt),
    TimedOut,
}

// ==============================================================================
// Client
// ==============================================================================

/// Read-only client for one Lithosphere JSON-RPC endpoint.
///
/// Configuration is fixed at construction. Calls share no mutable state, so a
/// single client can serve concurrent callers.
///
/// ```no_run
/// # async fn demo() -> Result<(), litho_core::LithoError> {
/// use litho_core::{CallOptions, LithoClient};
///
/// let client = LithoClient::connect("mainnet")?;
/// let balance = client
///     .get_balance("0x742d35Cc6634C0532925a3b844Bc9e7595f6E234", CallOptions::default())
///     .await?;
/// println!("{} {}", balance.formatted, balance.symbol);
/// # Ok(())
/// # }
/// ```
pub struct LithoClient {
    config: ClientConfig,
    network: Option<&'static NetworkIdentity>,
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl LithoClient {
    /// Connect to a named network (`mainnet`, `staging`, `devnet`, `local`)
    /// or a custom `http(s)://` RPC URL with default settings.
    pub fn connect(rpc_url_or_network: &str) -> Result<Self, LithoError> {
        Self::new(ClientConfig::new(rpc_url_or_network)?)
    }

    /// Build a client over HTTP. Fails with `InvalidParameter` when the RPC
    /// URL is not `http(s)` or the rate limit is zero.
    pub fn new(config: ClientConfig) -> Result<Self, LithoError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build a client over an arbitrary transport. Retry settings still come
    /// from `config`.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let network = NetworkIdentity::by_rpc_url(&config.rpc_url);
        let retry = RetryPolicy::from(config.retry);
        Self {
            config,
            network,
            transport,
            retry,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The predefined network whose RPC URL matches this client's URL exactly.
    pub fn get_network_config(&self) -> Option<&'static NetworkIdentity> {
        self.network
    }

    fn currency(&self) -> Currency {
        self.network.map_or(NATIVE_CURRENCY, |n| n.currency)
    }

    async fn request<M: RpcMethod>(&self, params: Vec<serde_json::Value>) -> Result<M::Output, LithoError> {
        let raw = self
            .retry
            .run(M::NAME, || self.transport.call(M::NAME, params.clone()))
            .await?;
        Ok(M::decode(raw)?)
    }

    /// Native balance of `address` at `options.block_tag`, formatted with the
    /// network currency (LITHO, 18 decimals, for custom endpoints).
    pub async fn get_balance(
        &self,
        address: &str,
        options: CallOptions,
    ) -> Result<AccountBalance, LithoError> {
        validate_address(address)?;

        let balance = self
            .request::<GetBalance>(vec![json!(address), json!(options.block_tag.to_param())])
            .await
            .map_err(|e| e.context(format!("Failed to get balance for {address}")))?;

        let currency = self.currency();
        Ok(AccountBalance {
            address: address.to_owned(),
            balance,
            formatted: format_units(balance, currency.decimals)?,
            symbol: currency.symbol.to_owned(),
        })
    }

    /// Current chain height from `eth_blockNumber`.
    pub async fn get_block_number(&self) -> Result<u64, LithoError> {
        self.request::<BlockNumber>(vec![])
            .await
            .map_err(|e| e.context("Failed to get block number"))
    }

    /// The configured chain id when known, otherwise the node's `eth_chainId`.
    pub async fn get_chain_id(&self) -> Result<u64, LithoError> {
        if let Some(chain_id) = self.config.chain_id {
            return Ok(chain_id);
        }
        self.request::<ChainId>(vec![])
            .await
            .map_err(|e| e.context("Failed to get chain ID"))
    }

    /// `None` when the node does not know the transaction.
    pub async fn get_transaction(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionResponse>, LithoError> {
        validate_hash(hash)?;
        self.request::<GetTransactionByHash>(vec![json!(hash)])
            .await
            .map_err(|e| e.context(format!("Failed to get transaction {hash}")))
    }

    /// `None` while the transaction is unknown or not yet mined.
    pub async fn get_transaction_receipt(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionReceipt>, LithoError> {
        validate_hash(hash)?;
        self.request::<GetTransactionReceipt>(vec![json!(hash)])
            .await
            .map_err(|e| e.context(format!("Failed to get transaction receipt {hash}")))
    }

    /// Poll until `hash` has a receipt with at least `options.confirmations`
    /// confirmations, or fail with a `Timeout` error once `options.timeout`
    /// has elapsed. RPC failures while polling abort the wait.
    ///
    /// The receipt is returned whether or not execution succeeded; use
    /// [`TransactionReceipt::ensure_success`] to reject reverted ones.
    pub async fn wait_for_transaction(
        &self,
        hash: &str,
        options: WaitOptions,
    ) -> Result<TransactionReceipt, LithoError> {
        validate_hash(hash)?;

        let started = Instant::now();
        let mut state = WaitState::Polling;
        loop {
            state = match state {
                WaitState::Polling if started.elapsed() >= options.timeout => WaitState::TimedOut,
                WaitState::Polling => match self.poll_confirmations(hash, options.confirmations).await? {
                    Some(receipt) => WaitState::Confirmed(receipt),
                    None => {
                        tokio::time::sleep(options.poll_interval).await;
                        WaitState::Polling
                    }
                },
                WaitState::Confirmed(receipt) => {
                    info!(tx = hash, block = receipt.block_number, "transaction confirmed");
                    return Ok(receipt);
                }
                WaitState::TimedOut => {
                    return Err(LithoError::timeout(format!(
                        "Transaction {hash} not confirmed within {}ms",
                        options.timeout.as_millis()
                    )));
                }
            };
        }
    }

    /// [`Self::wait_for_transaction`] that stops early with a `Cancelled`
    /// error when `cancel` fires. In-flight requests are dropped.
    pub async fn wait_for_transaction_with_cancel(
        &self,
        hash: &str,
        options: WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<TransactionReceipt, LithoError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LithoError::cancelled(format!(
                "Wait for transaction {hash} cancelled"
            ))),
            result = self.wait_for_transaction(hash, options) => result,
        }
    }

    /// One poll: the receipt if it has reached `required` confirmations.
    async fn poll_confirmations(
        &self,
        hash: &str,
        required: u64,
    ) -> Result<Option<TransactionReceipt>, LithoError> {
        let Some(receipt) = self.get_transaction_receipt(hash).await? else {
            debug!(tx = hash, "no receipt yet");
            return Ok(None);
        };

        let current = self.get_block_number().await?;
        let confirmations = receipt.confirmations(current);
        debug!(
            tx = hash,
            block = receipt.block_number,
            current,
            confirmations,
            required,
            "receipt found"
        );

        Ok((confirmations >= required).then_some(receipt))
    }
}
