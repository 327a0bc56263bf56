//! Hex codec for the archive's wire encoding.
//!
//! The archive sends every numeric and byte-valued field as a
//! `0x`-prefixed hex string. Quantities widen to [`U256`] because values
//! like `totalDifficulty` exceed 64 bits; byte strings stay byte strings.
//! The two forms are never interchangeable.

use alloy::primitives::{Address, Bytes, B256, B64, U256};

use crate::error::{GatewayError, GatewayResult};

fn strip_prefix(value: &str) -> GatewayResult<&str> {
    value.strip_prefix("0x").ok_or_else(|| {
        GatewayError::Decoding(format!("hex string `{value}` is missing the 0x prefix"))
    })
}

/// Decodes a hex quantity such as `0x1b4` into an integer.
pub fn decode_quantity(value: &str) -> GatewayResult<U256> {
    let digits = strip_prefix(value)?;
    U256::from_str_radix(digits, 16)
        .map_err(|e| GatewayError::Decoding(format!("invalid hex quantity `{value}`: {e}")))
}

/// Encodes an integer as a minimal hex quantity, `0x0` for zero.
pub fn encode_quantity(value: U256) -> String {
    format!("{value:#x}")
}

/// Decodes a hex byte string of any length.
pub fn decode_bytes(value: &str) -> GatewayResult<Bytes> {
    let digits = strip_prefix(value)?;
    let raw = hex::decode(digits)
        .map_err(|e| GatewayError::Decoding(format!("invalid hex bytes `{value}`: {e}")))?;
    Ok(raw.into())
}

/// Decodes a 32-byte word (hashes, roots, topics).
pub fn decode_b256(value: &str) -> GatewayResult<B256> {
    let raw = decode_bytes(value)?;
    if raw.len() != 32 {
        return Err(GatewayError::Decoding(format!(
            "expected 32 bytes in `{value}`, got {}",
            raw.len()
        )));
    }
    Ok(B256::from_slice(&raw))
}

/// Decodes an 8-byte word (the block nonce).
pub fn decode_b64(value: &str) -> GatewayResult<B64> {
    let raw = decode_bytes(value)?;
    if raw.len() != 8 {
        return Err(GatewayError::Decoding(format!(
            "expected 8 bytes in `{value}`, got {}",
            raw.len()
        )));
    }
    Ok(B64::from_slice(&raw))
}

/// Decodes a 20-byte account address.
pub fn decode_address(value: &str) -> GatewayResult<Address> {
    let raw = decode_bytes(value)?;
    if raw.len() != 20 {
        return Err(GatewayError::Decoding(format!(
            "expected 20 bytes in `{value}`, got {}",
            raw.len()
        )));
    }
    Ok(Address::from_slice(&raw))
}
