use clap::{Parser, Subcommand};
use litho_core::BlockTag;

/// litho: read-only client for Lithosphere JSON-RPC nodes.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Network label (mainnet, staging, devnet, local) or custom RPC URL.
    #[arg(long, default_value = "local", env = "LITHO_RPC")]
    pub rpc: String,

    /// Chain id to report instead of asking the node.
    #[arg(long, env = "LITHO_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Per-request deadline in milliseconds.
    #[arg(long, default_value = "30000", env = "LITHO_TIMEOUT_MS")]
    pub timeout_ms: u64,

    /// Retries after a failed request.
    #[arg(long, default_value = "3", env = "LITHO_RETRY_COUNT")]
    pub retry_count: u32,

    /// Base delay between retries in milliseconds; grows linearly.
    #[arg(long, default_value = "1000", env = "LITHO_RETRY_DELAY_MS")]
    pub retry_delay_ms: u64,

    /// Cap on outbound requests per second (unlimited if omitted).
    #[arg(long, env = "LITHO_REQUESTS_PER_SECOND")]
    pub requests_per_second: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Native balance of an account.
    Balance {
        address: String,
        /// latest, pending, earliest or a block number.
        #[arg(long, default_value = "latest")]
        block: BlockTag,
    },
    /// Current chain height.
    BlockNumber,
    /// Chain id of the connected network.
    ChainId,
    /// Transaction by hash.
    Tx { hash: String },
    /// Receipt of a mined transaction.
    Receipt { hash: String },
    /// Block until a transaction has enough confirmations. Ctrl-C aborts.
    Wait {
        hash: String,
        /// Confirmations required, counting the receipt's own block.
        #[arg(long, default_value = "1")]
        confirmations: u64,
        /// Budget for the whole wait in milliseconds (unlike the global
        /// per-request `--timeout-ms`).
        #[arg(long, default_value = "60000")]
        wait_timeout_ms: u64,
        /// Pause between receipt polls in milliseconds.
        #[arg(long, default_value = "2000")]
        poll_interval_ms: u64,
    },
    /// Predefined network matching the RPC URL, if any.
    Network,
}
