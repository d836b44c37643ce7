pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod network;
pub mod rpc;
pub mod types;
pub mod validate;

#[cfg(test)]
mod test_util;

pub use client::{LithoClient, WaitOptions};
pub use config::{ClientConfig, RetryConfig};
pub use error::{ErrorKind, LithoError};
pub use network::{NetworkIdentity, NetworkName, NETWORKS};
pub use types::{
    AccountBalance, BlockTag, CallOptions, TransactionReceipt, TransactionResponse,
    TransactionStatus,
};

/// Library version reported by the `litho` binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
