//! Pure conversions from raw JSON-RPC results into domain types.
//!
//! Nothing here performs I/O. Every failure is a [`DecodeError`] naming the
//! offending field, which the client reports as a network error because it
//! means the endpoint returned something non-conformant.

use alloy_primitives::{utils, U256};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{DecodeError, LithoError};
use crate::types::{Log, ReceiptStatus, TransactionReceipt, TransactionResponse, TransactionStatus};

// ==============================================================================
// Quantities
// ==============================================================================

/// Parse a `0x`-prefixed hex quantity into a [`U256`].
///
/// Values wider than 256 bits are rejected, never truncated.
pub fn parse_quantity(field: &'static str, value: &str) -> Result<U256, DecodeError> {
    let digits = hex_digits(field, value)?;
    U256::from_str_radix(digits, 16).map_err(|e| DecodeError::InvalidQuantity {
        field,
        value: value.to_owned(),
        reason: e.to_string(),
    })
}

/// Parse a `0x`-prefixed hex quantity that must fit in a `u64` (block
/// numbers, indices, chain ids).
pub fn parse_quantity_u64(field: &'static str, value: &str) -> Result<u64, DecodeError> {
    let digits = hex_digits(field, value)?;
    u64::from_str_radix(digits, 16).map_err(|_| DecodeError::OutOfRange {
        field,
        value: value.to_owned(),
    })
}

fn hex_digits<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DecodeError> {
    let invalid = |reason: &str| DecodeError::InvalidQuantity {
        field,
        value: value.to_owned(),
        reason: reason.to_owned(),
    };

    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| invalid("missing 0x prefix"))?;
    if digits.is_empty() {
        return Err(invalid("no digits after 0x"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid("non-hex digit"));
    }
    Ok(digits)
}

fn quantity_str<'a>(
    field: &'static str,
    raw: &'a serde_json::Value,
) -> Result<&'a str, DecodeError> {
    raw.as_str().ok_or_else(|| DecodeError::InvalidQuantity {
        field,
        value: raw.to_string(),
        reason: "expected a hex string".to_owned(),
    })
}

/// Decode a raw result that must be a hex quantity string.
pub fn decode_quantity(field: &'static str, raw: &serde_json::Value) -> Result<U256, DecodeError> {
    parse_quantity(field, quantity_str(field, raw)?)
}

pub fn decode_quantity_u64(
    field: &'static str,
    raw: &serde_json::Value,
) -> Result<u64, DecodeError> {
    parse_quantity_u64(field, quantity_str(field, raw)?)
}

// ==============================================================================
// Unit Formatting
// ==============================================================================

/// Render `value / 10^decimals` as an exact decimal string.
///
/// Trailing fractional zeros are stripped and the decimal point is omitted
/// when the fractional part is zero: `1500000000000000000` with 18 decimals
/// renders as `"1.5"`, `10^18` as `"1"`. More than 77 decimals cannot be
/// represented and is an `InvalidParameter` error.
pub fn format_units(value: U256, decimals: u8) -> Result<String, LithoError> {
    let padded = utils::format_units(value, decimals).map_err(|e| {
        LithoError::invalid_parameter(format!("cannot format units with {decimals} decimals"))
            .with_source(e)
    })?;
    Ok(padded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned())
}

// ==============================================================================
// Transactions
// ==============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    hash: String,
    block_number: Option<String>,
    block_hash: Option<String>,
    transaction_index: Option<String>,
    from: String,
    to: Option<String>,
    value: String,
    gas: String,
    gas_price: String,
}

/// Shape an `eth_getTransactionByHash` result. A `null` result means the node
/// does not know the transaction.
pub fn decode_transaction(
    raw: serde_json::Value,
) -> Result<Option<TransactionResponse>, DecodeError> {
    let Some(raw) = from_nullable::<RawTransaction>("transaction", raw)? else {
        return Ok(None);
    };

    let block_number = raw
        .block_number
        .as_deref()
        .map(|n| parse_quantity_u64("blockNumber", n))
        .transpose()?;
    let transaction_index = raw
        .transaction_index
        .as_deref()
        .map(|n| parse_quantity_u64("transactionIndex", n))
        .transpose()?;

    // Only a receipt can tell whether execution failed.
    let status = if block_number.is_some() {
        TransactionStatus::Confirmed
    } else {
        TransactionStatus::Pending
    };

    Ok(Some(TransactionResponse {
        hash: raw.hash,
        block_number,
        block_hash: raw.block_hash,
        transaction_index,
        from: raw.from,
        to: raw.to,
        value: parse_quantity("value", &raw.value)?,
        gas_used: parse_quantity("gas", &raw.gas)?,
        gas_price: parse_quantity("gasPrice", &raw.gas_price)?,
        status,
    }))
}

// ==============================================================================
// Receipts and Logs
// ==============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: String,
    block_number: String,
    block_hash: String,
    gas_used: String,
    cumulative_gas_used: String,
    contract_address: Option<String>,
    status: String,
    logs: Vec<RawLog>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLog {
    address: String,
    topics: Vec<String>,
    data: String,
    block_number: String,
    transaction_hash: String,
    log_index: String,
}

/// Shape an `eth_getTransactionReceipt` result. A `null` result means the
/// transaction is unknown or not mined yet.
pub fn decode_receipt(raw: serde_json::Value) -> Result<Option<TransactionReceipt>, DecodeError> {
    let Some(raw) = from_nullable::<RawReceipt>("receipt", raw)? else {
        return Ok(None);
    };

    let status = match parse_quantity_u64("status", &raw.status) {
        Ok(0) => ReceiptStatus::Failure,
        Ok(1) => ReceiptStatus::Success,
        _ => return Err(DecodeError::InvalidStatus(raw.status)),
    };

    let logs = raw
        .logs
        .into_iter()
        .map(decode_log)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(TransactionReceipt {
        transaction_hash: raw.transaction_hash,
        block_number: parse_quantity_u64("blockNumber", &raw.block_number)?,
        block_hash: raw.block_hash,
        gas_used: parse_quantity("gasUsed", &raw.gas_used)?,
        cumulative_gas_used: parse_quantity("cumulativeGasUsed", &raw.cumulative_gas_used)?,
        contract_address: raw.contract_address,
        status,
        logs,
    }))
}

fn decode_log(raw: RawLog) -> Result<Log, DecodeError> {
    Ok(Log {
        block_number: parse_quantity_u64("logs.blockNumber", &raw.block_number)?,
        log_index: parse_quantity_u64("logs.logIndex", &raw.log_index)?,
        address: raw.address,
        topics: raw.topics,
        data: raw.data,
        transaction_hash: raw.transaction_hash,
    })
}

fn from_nullable<T: DeserializeOwned>(
    what: &'static str,
    raw: serde_json::Value,
) -> Result<Option<T>, DecodeError> {
    if raw.is_null() {
        return Ok(None);
    }
    serde_json::from_value(raw)
        .map(Some)
        .map_err(|source| DecodeError::Malformed { what, source })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_util::{raw_receipt_json, raw_transaction_json, TX_HASH};

    fn wei(s: &str) -> U256 {
        s.parse().expect("decimal literal")
    }

    fn units(value: U256, decimals: u8) -> String {
        format_units(value, decimals).expect("supported decimals")
    }

    #[test]
    fn format_units_edge_cases() {
        assert_eq!(units(U256::ZERO, 18), "0");
        assert_eq!(units(U256::from(1u8), 18), "0.000000000000000001");
        assert_eq!(units(wei("1500000000000000000"), 18), "1.5");
        assert_eq!(units(wei("1000000000000000000"), 18), "1");
        assert_eq!(units(wei("42000000000000000000"), 18), "42");
    }

    #[test]
    fn format_units_is_exact_for_large_values() {
        assert_eq!(
            units(U256::MAX, 18),
            "115792089237316195423570985008687907853269984665640564039457.584007913129639935"
        );
        assert_eq!(units(wei("123456789"), 0), "123456789");
        assert_eq!(units(wei("1000"), 0), "1000");
        assert_eq!(units(wei("1050"), 3), "1.05");
        assert_eq!(units(wei("100000"), 3), "100");
    }

    #[test]
    fn format_units_accepts_widest_unit() {
        assert_eq!(units(U256::from(5u8), 77), format!("0.{}5", "0".repeat(76)));
    }

    #[test]
    fn format_units_rejects_decimals_beyond_u256() {
        // 10^78 does not fit in 256 bits.
        let err = format_units(U256::from(5u8), 78).expect_err("78 decimals");
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidParameter);
        assert!(err.message().contains("78 decimals"));
    }

    #[test]
    fn parse_quantity_accepts_hex() {
        assert_eq!(parse_quantity("value", "0x0").unwrap(), U256::ZERO);
        assert_eq!(
            parse_quantity("value", "0xDE0B6B3A7640000").unwrap(),
            wei("1000000000000000000")
        );
        assert_eq!(parse_quantity_u64("blockNumber", "0x1b4").unwrap(), 436);
    }

    #[test]
    fn parse_quantity_rejects_malformed_input() {
        for bad in ["", "0x", "1b4", "0xzz", "0x1_0", "0x-1"] {
            let err = parse_quantity("value", bad).expect_err(bad);
            assert!(matches!(err, DecodeError::InvalidQuantity { field: "value", .. }), "{bad}");
        }
    }

    #[test]
    fn parse_quantity_rejects_overflow() {
        let too_wide = format!("0x1{}", "0".repeat(64));
        assert!(parse_quantity("value", &too_wide).is_err());

        let err = parse_quantity_u64("blockNumber", "0x10000000000000000").expect_err("> u64");
        assert!(matches!(err, DecodeError::OutOfRange { field: "blockNumber", .. }));
    }

    #[test]
    fn decode_quantity_requires_string() {
        let err = decode_quantity("balance", &json!(12)).expect_err("numbers are not quantities");
        assert!(err.to_string().contains("expected a hex string"));
    }

    #[test]
    fn decode_mined_transaction() {
        let tx = decode_transaction(raw_transaction_json(Some(0x10)))
            .unwrap()
            .expect("present");
        assert_eq!(tx.hash, TX_HASH);
        assert_eq!(tx.block_number, Some(16));
        assert_eq!(tx.transaction_index, Some(2));
        assert_eq!(tx.value, wei("1000000000000000000"));
        assert_eq!(tx.gas_used, U256::from(21_000u32));
        assert_eq!(tx.gas_price, U256::from(1_000_000_000u64));
        assert_eq!(tx.status, TransactionStatus::Confirmed);
    }

    #[test]
    fn decode_pending_transaction() {
        let tx = decode_transaction(raw_transaction_json(None))
            .unwrap()
            .expect("present");
        assert_eq!(tx.block_number, None);
        assert_eq!(tx.block_hash, None);
        assert_eq!(tx.transaction_index, None);
        assert_eq!(tx.status, TransactionStatus::Pending);
    }

    #[test]
    fn decode_contract_creation_has_no_recipient() {
        let mut raw = raw_transaction_json(Some(1));
        raw["to"] = serde_json::Value::Null;
        let tx = decode_transaction(raw).unwrap().expect("present");
        assert_eq!(tx.to, None);
    }

    #[test]
    fn decode_null_transaction_is_absent() {
        assert_eq!(decode_transaction(serde_json::Value::Null).unwrap(), None);
    }

    #[test]
    fn decode_transaction_missing_field_is_malformed() {
        let mut raw = raw_transaction_json(Some(1));
        raw.as_object_mut().unwrap().remove("gasPrice");
        let err = decode_transaction(raw).expect_err("gasPrice is required");
        assert!(matches!(err, DecodeError::Malformed { what: "transaction", .. }));
    }

    #[test]
    fn decode_receipt_with_logs() {
        let receipt = decode_receipt(raw_receipt_json(0x20, "0x1"))
            .unwrap()
            .expect("present");
        assert_eq!(receipt.block_number, 32);
        assert_eq!(receipt.status, ReceiptStatus::Success);
        assert_eq!(receipt.gas_used, U256::from(21_000u32));
        assert_eq!(receipt.cumulative_gas_used, U256::from(42_000u32));
        assert_eq!(receipt.logs.len(), 2);
        assert_eq!(receipt.logs[0].block_number, 32);
        assert_eq!(receipt.logs[0].log_index, 0);
        assert_eq!(receipt.logs[1].log_index, 10);
        assert_eq!(receipt.logs[1].topics.len(), 2);
    }

    #[test]
    fn decode_failed_receipt_status() {
        let receipt = decode_receipt(raw_receipt_json(1, "0x0"))
            .unwrap()
            .expect("present");
        assert_eq!(receipt.status, ReceiptStatus::Failure);
    }

    #[test]
    fn decode_receipt_rejects_unknown_status() {
        let err = decode_receipt(raw_receipt_json(1, "0x2")).expect_err("status must be a bit");
        assert!(matches!(err, DecodeError::InvalidStatus(s) if s == "0x2"));
    }

    #[test]
    fn decode_receipt_rejects_bad_log_index() {
        let mut raw = raw_receipt_json(1, "0x1");
        raw["logs"][0]["logIndex"] = json!("zero");
        let err = decode_receipt(raw).expect_err("log index must be hex");
        assert!(err.to_string().contains("logs.logIndex"));
    }

    #[test]
    fn decode_null_receipt_is_absent() {
        assert_eq!(decode_receipt(serde_json::Value::Null).unwrap(), None);
    }
}
