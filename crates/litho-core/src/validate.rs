use crate::error::LithoError;

const ADDRESS_HEX_LEN: usize = 40;
const HASH_HEX_LEN: usize = 64;

/// Accept `0x` followed by exactly 40 hex digits (either case).
pub fn validate_address(address: &str) -> Result<(), LithoError> {
    if is_prefixed_hex(address, ADDRESS_HEX_LEN) {
        Ok(())
    } else {
        Err(LithoError::invalid_address(format!(
            "Invalid address format: {address}"
        )))
    }
}

/// Accept `0x` followed by exactly 64 hex digits (either case).
pub fn validate_hash(hash: &str) -> Result<(), LithoError> {
    if is_prefixed_hex(hash, HASH_HEX_LEN) {
        Ok(())
    } else {
        Err(LithoError::invalid_parameter(format!(
            "Invalid transaction hash format: {hash}"
        )))
    }
}

fn is_prefixed_hex(value: &str, digits: usize) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == digits && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}
