//! Domain types returned by [`crate::LithoClient`].
//!
//! Every value here is a read-only snapshot decoded from a single RPC call;
//! nothing is cached between calls. Monetary and gas quantities use
//! [`U256`], which rejects rather than wraps on overflow.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::Serialize;

use crate::error::{ErrorKind, LithoError};

// ==============================================================================
// Block Tag
// ==============================================================================

/// Block selector for state queries such as `eth_getBalance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    #[default]
    Latest,
    Pending,
    Earliest,
    Number(u64),
}

impl BlockTag {
    /// JSON-RPC parameter form: a tag name, or a hex quantity for numbers.
    pub fn to_param(&self) -> String {
        match self {
            Self::Latest => "latest".to_owned(),
            Self::Pending => "pending".to_owned(),
            Self::Earliest => "earliest".to_owned(),
            Self::Number(n) => format!("{n:#x}"),
        }
    }
}

impl From<u64> for BlockTag {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            other => f.write_str(&other.to_param()),
        }
    }
}

impl FromStr for BlockTag {
    type Err = LithoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "pending" => Ok(Self::Pending),
            "earliest" => Ok(Self::Earliest),
            other => other.parse::<u64>().map(Self::Number).map_err(|_| {
                LithoError::invalid_parameter(format!(
                    "invalid block tag `{other}`; expected latest, pending, earliest or a block number"
                ))
            }),
        }
    }
}

/// Options for read calls that accept a block selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOptions {
    pub block_tag: BlockTag,
}

// ==============================================================================
// Account Types
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    pub address: String,
    /// Raw balance in the smallest unit (wei).
    pub balance: U256,
    /// `balance` scaled by the currency decimals, trailing zeros stripped.
    pub formatted: String,
    pub symbol: String,
}

// ==============================================================================
// Transaction Types
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    /// Outcome of a mined transaction, as recorded by its receipt.
    pub fn from_receipt(receipt: &TransactionReceipt) -> Self {
        if receipt.is_success() {
            Self::Confirmed
        } else {
            Self::Failed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub hash: String,
    /// `None` while the transaction is pending.
    pub block_number: Option<u64>,
    pub block_hash: Option<String>,
    pub transaction_index: Option<u64>,
    pub from: String,
    /// `None` for contract creation.
    pub to: Option<String>,
    pub value: U256,
    /// Gas limit supplied with the transaction.
    pub gas_used: U256,
    pub gas_price: U256,
    pub status: TransactionStatus,
}

/// Execution outcome bit of a receipt. Serialized as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum ReceiptStatus {
    Failure,
    Success,
}

impl From<ReceiptStatus> for u8 {
    fn from(status: ReceiptStatus) -> Self {
        match status {
            ReceiptStatus::Failure => 0,
            ReceiptStatus::Success => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub block_number: u64,
    pub block_hash: String,
    pub gas_used: U256,
    pub cumulative_gas_used: U256,
    pub contract_address: Option<String>,
    pub status: ReceiptStatus,
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }

    /// Fail with `TransactionFailed` when the receipt records a reverted
    /// execution.
    pub fn ensure_success(&self) -> Result<&Self, LithoError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(LithoError::new(
                ErrorKind::TransactionFailed,
                format!(
                    "transaction {} failed in block {}",
                    self.transaction_hash, self.block_number
                ),
            ))
        }
    }

    /// Blocks mined on top of (and including) the receipt's block, given the
    /// current chain height. Zero when the node reports a height below the
    /// receipt's block.
    pub fn confirmations(&self, current_block: u64) -> u64 {
        current_block
            .checked_sub(self.block_number)
            .map_or(0, |depth| depth + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    pub block_number: u64,
    pub transaction_hash: String,
    pub log_index: u64,
}
