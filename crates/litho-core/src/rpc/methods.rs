//! Typed table of the JSON-RPC methods the client consumes.
//!
//! Each method is a unit type pairing the wire method name with the decoder
//! for its `result`, so the client has a single generic request path.

use alloy_primitives::U256;

use crate::decode::{decode_quantity, decode_quantity_u64, decode_receipt, decode_transaction};
use crate::error::DecodeError;
use crate::types::{TransactionReceipt, TransactionResponse};

pub trait RpcMethod {
    const NAME: &'static str;
    type Output;

    fn decode(raw: serde_json::Value) -> Result<Self::Output, DecodeError>;
}

pub struct GetBalance;

impl RpcMethod for GetBalance {
    const NAME: &'static str = "eth_getBalance";
    type Output = U256;

    fn decode(raw: serde_json::Value) -> Result<U256, DecodeError> {
        decode_quantity("balance", &raw)
    }
}

pub struct BlockNumber;

impl RpcMethod for BlockNumber {
    const NAME: &'static str = "eth_blockNumber";
    type Output = u64;

    fn decode(raw: serde_json::Value) -> Result<u64, DecodeError> {
        decode_quantity_u64("blockNumber", &raw)
    }
}

pub struct ChainId;

impl RpcMethod for ChainId {
    const NAME: &'static str = "eth_chainId";
    type Output = u64;

    fn decode(raw: serde_json::Value) -> Result<u64, DecodeError> {
        decode_quantity_u64("chainId", &raw)
    }
}

pub struct GetTransactionByHash;

impl RpcMethod for GetTransactionByHash {
    const NAME: &'static str = "eth_getTransactionByHash";
    type Output = Option<TransactionResponse>;

    fn decode(raw: serde_json::Value) -> Result<Self::Output, DecodeError> {
        decode_transaction(raw)
    }
}

pub struct GetTransactionReceipt;

impl RpcMethod for GetTransactionReceipt {
    const NAME: &'static str = "eth_getTransactionReceipt";
    type Output = Option<TransactionReceipt>;

    fn decode(raw: serde_json::Value) -> Result<Self::Output, DecodeError> {
        decode_receipt(raw)
    }
}
