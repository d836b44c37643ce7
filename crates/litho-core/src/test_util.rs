//! Shared test fixtures for `litho-core` unit tests.
//!
//! Raw JSON builders mirror what an Ethereum-compatible node returns, so the
//! decoder and client tests exercise the same wire shapes.

use alloy_primitives::U256;
use serde_json::json;

use crate::types::{Log, ReceiptStatus, TransactionReceipt};

// ==============================================================================
// Identifiers
// ==============================================================================

pub const ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f6E234";
pub const OTHER_ADDRESS: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const TX_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";
pub const BLOCK_HASH: &str = "0x1d59ff54b1eb26b013ce3cb5fc9dab3705b415a67127a003c3e61eb445bb8df2";

// ==============================================================================
// Raw RPC Results
// ==============================================================================

/// An `eth_getTransactionByHash` result. `block` of `None` yields a pending
/// transaction.
pub fn raw_transaction_json(block: Option<u64>) -> serde_json::Value {
    let (block_number, block_hash, index) = match block {
        Some(n) => (json!(format!("{n:#x}")), json!(BLOCK_HASH), json!("0x2")),
        None => (json!(null), json!(null), json!(null)),
    };
    json!({
        "hash": TX_HASH,
        "blockNumber": block_number,
        "blockHash": block_hash,
        "transactionIndex": index,
        "from": ADDRESS,
        "to": OTHER_ADDRESS,
        "value": "0xde0b6b3a7640000",
        "gas": "0x5208",
        "gasPrice": "0x3b9aca00",
        "nonce": "0x15",
        "input": "0x"
    })
}

/// An `eth_getTransactionReceipt` result mined at `block` with two logs.
pub fn raw_receipt_json(block: u64, status: &str) -> serde_json::Value {
    let block_hex = format!("{block:#x}");
    json!({
        "transactionHash": TX_HASH,
        "transactionIndex": "0x2",
        "blockNumber": block_hex,
        "blockHash": BLOCK_HASH,
        "from": ADDRESS,
        "to": OTHER_ADDRESS,
        "gasUsed": "0x5208",
        "cumulativeGasUsed": "0xa410",
        "contractAddress": null,
        "status": status,
        "logs": [
            {
                "address": OTHER_ADDRESS,
                "topics": ["0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"],
                "data": "0x",
                "blockNumber": block_hex,
                "transactionHash": TX_HASH,
                "logIndex": "0x0"
            },
            {
                "address": OTHER_ADDRESS,
                "topics": [
                    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
                    "0x000000000000000000000000742d35cc6634c0532925a3b844bc9e7595f6e234"
                ],
                "data": "0x00000000000000000000000000000000000000000000000000000000000003e8",
                "blockNumber": block_hex,
                "transactionHash": TX_HASH,
                "logIndex": "0xa"
            }
        ]
    })
}

// ==============================================================================
// Domain Values
// ==============================================================================

/// A successful receipt with no logs mined at `block`.
pub fn sample_receipt(block: u64) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: TX_HASH.to_owned(),
        block_number: block,
        block_hash: BLOCK_HASH.to_owned(),
        gas_used: U256::from(21_000u32),
        cumulative_gas_used: U256::from(21_000u32),
        contract_address: None,
        status: ReceiptStatus::Success,
        logs: Vec::<Log>::new(),
    }
}
