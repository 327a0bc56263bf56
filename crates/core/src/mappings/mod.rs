//! Decoding of raw wire records into native-typed ones.
//!
//! Pure functions, no I/O. Quantity fields widen through the hex codec
//! to `U256`; byte fields stay byte sequences; the two are never mixed.
//! A field the mapper needs but the query did not select surfaces as a
//! `Decoding` error naming the field, which points at a field-selection
//! mismatch upstream, not a runtime condition.

mod types;

pub use types::{Header, LogRecord, Receipt};

use alloy::primitives::B256;

use crate::codec::{decode_address, decode_b256, decode_b64, decode_bytes, decode_quantity};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::types::{BlockHeader, Log, Transaction};

pub(crate) fn require<T>(value: Option<T>, field: &str) -> GatewayResult<T> {
    value.ok_or_else(|| {
        GatewayError::Decoding(format!(
            "required field `{field}` is absent; was it part of the field selection?"
        ))
    })
}

/// Decodes a raw block header into a [`Header`].
pub fn map_header(value: &BlockHeader) -> GatewayResult<Header> {
    Ok(Header {
        number: value.number,
        hash: decode_b256(&value.hash)?,
        parent_hash: decode_b256(require(value.parent_hash.as_deref(), "parentHash")?)?,
        base_fee_per_gas: match value.base_fee_per_gas.as_deref() {
            Some(fee) => Some(decode_quantity(fee)?),
            None => None,
        },
        difficulty: decode_quantity(require(value.difficulty.as_deref(), "difficulty")?)?,
        total_difficulty: decode_quantity(require(
            value.total_difficulty.as_deref(),
            "totalDifficulty",
        )?)?,
        extra_data: decode_bytes(require(value.extra_data.as_deref(), "extraData")?)?,
        gas_limit: decode_quantity(require(value.gas_limit.as_deref(), "gasLimit")?)?,
        gas_used: decode_quantity(require(value.gas_used.as_deref(), "gasUsed")?)?,
        logs_bloom: decode_bytes(require(value.logs_bloom.as_deref(), "logsBloom")?)?,
        miner: decode_address(require(value.miner.as_deref(), "miner")?)?,
        mix_hash: decode_b256(require(value.mix_hash.as_deref(), "mixHash")?)?,
        nonce: decode_b64(require(value.nonce.as_deref(), "nonce")?)?,
        receipts_root: decode_b256(require(value.receipts_root.as_deref(), "receiptsRoot")?)?,
        sha3_uncles: decode_b256(require(value.sha3_uncles.as_deref(), "sha3Uncles")?)?,
        size: require(value.size, "size")?,
        state_root: decode_b256(require(value.state_root.as_deref(), "stateRoot")?)?,
        timestamp: require(value.timestamp, "timestamp")? as u64,
        transactions_root: decode_b256(require(
            value.transactions_root.as_deref(),
            "transactionsRoot",
        )?)?,
    })
}

/// Decodes a raw transaction into a [`Receipt`], joined with its block
/// context and the logs it emitted.
pub fn map_receipt(
    value: &Transaction,
    block_number: u64,
    block_hash: B256,
    logs: Vec<LogRecord>,
) -> GatewayResult<Receipt> {
    Ok(Receipt {
        block_number,
        block_hash,
        from: decode_address(require(value.from.as_deref(), "from")?)?,
        to: match value.to.as_deref() {
            Some(to) => Some(decode_address(to)?),
            None => None,
        },
        hash: decode_b256(require(value.hash.as_deref(), "hash")?)?,
        status: require(value.status, "status")?,
        chain_id: value.chain_id,
        contract_address: match value.contract_address.as_deref() {
            Some(address) => Some(decode_address(address)?),
            None => None,
        },
        cumulative_gas_used: decode_quantity(require(
            value.cumulative_gas_used.as_deref(),
            "cumulativeGasUsed",
        )?)?,
        effective_gas_price: decode_quantity(require(
            value.effective_gas_price.as_deref(),
            "effectiveGasPrice",
        )?)?,
        gas: decode_quantity(require(value.gas.as_deref(), "gas")?)?,
        gas_price: decode_quantity(require(value.gas_price.as_deref(), "gasPrice")?)?,
        gas_used: decode_quantity(require(value.gas_used.as_deref(), "gasUsed")?)?,
        input: decode_bytes(require(value.input.as_deref(), "input")?)?,
        max_fee_per_gas: match value.max_fee_per_gas.as_deref() {
            Some(fee) => Some(decode_quantity(fee)?),
            None => None,
        },
        max_priority_fee_per_gas: match value.max_priority_fee_per_gas.as_deref() {
            Some(fee) => Some(decode_quantity(fee)?),
            None => None,
        },
        nonce: require(value.nonce, "nonce")?,
        v: decode_quantity(require(value.v.as_deref(), "v")?)?,
        r: decode_bytes(require(value.r.as_deref(), "r")?)?,
        s: decode_bytes(require(value.s.as_deref(), "s")?)?,
        transaction_index: require(value.transaction_index, "transactionIndex")?,
        transaction_type: require(value.kind, "type")?,
        value: decode_quantity(require(value.value.as_deref(), "value")?)?,
        y_parity: value.y_parity,
        logs,
    })
}

/// Decodes a raw log into a [`LogRecord`] joined with its block context.
pub fn map_log(value: &Log, block_number: u64, block_hash: B256) -> GatewayResult<LogRecord> {
    let topics = require(value.topics.as_deref(), "topics")?;
    Ok(LogRecord {
        block_number,
        block_hash,
        address: decode_address(require(value.address.as_deref(), "address")?)?,
        transaction_index: require(value.transaction_index, "transactionIndex")?,
        transaction_hash: decode_b256(require(value.transaction_hash.as_deref(), "transactionHash")?)?,
        log_index: require(value.log_index, "logIndex")?,
        data: decode_bytes(require(value.data.as_deref(), "data")?)?,
        topics: topics.iter().map(|topic| decode_b256(topic)).collect::<GatewayResult<_>>()?,
    })
}

/// Maps the logs of `logs` that belong to transaction `transaction_index`,
/// preserving their order within the block.
pub fn map_transaction_logs(
    logs: &[Log],
    transaction_index: u64,
    block_number: u64,
    block_hash: B256,
) -> GatewayResult<Vec<LogRecord>> {
    let mut mapped = Vec::new();
    for log in logs {
        if log.transaction_index == Some(transaction_index) {
            mapped.push(map_log(log, block_number, block_hash)?);
        }
    }
    Ok(mapped)
}
