//! Wire schema of the archive query protocol.
//!
//! Requests are serialized camelCase with unset members omitted, so a
//! query body only carries what it actually asks for. Responses arrive
//! with numeric and byte payloads hex-encoded; the raw record types keep
//! them as strings and leave widening to the mapping layer.

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !value
}

/// Per-field projection over block headers.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockFieldSelection {
    #[serde(skip_serializing_if = "is_false")]
    pub number: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub hash: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub parent_hash: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub timestamp: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub transactions_root: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub receipts_root: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub state_root: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub logs_bloom: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub sha3_uncles: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub extra_data: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub miner: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub nonce: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub mix_hash: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub size: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub gas_limit: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub gas_used: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub difficulty: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub total_difficulty: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub base_fee_per_gas: bool,
}

impl BlockFieldSelection {
    /// Selects every header field.
    pub fn all() -> Self {
        Self {
            number: true,
            hash: true,
            parent_hash: true,
            timestamp: true,
            transactions_root: true,
            receipts_root: true,
            state_root: true,
            logs_bloom: true,
            sha3_uncles: true,
            extra_data: true,
            miner: true,
            nonce: true,
            mix_hash: true,
            size: true,
            gas_limit: true,
            gas_used: true,
            difficulty: true,
            total_difficulty: true,
            base_fee_per_gas: true,
        }
    }
}

/// Per-field projection over transactions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxFieldSelection {
    #[serde(skip_serializing_if = "is_false")]
    pub transaction_index: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub hash: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub nonce: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub from: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub to: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub input: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub value: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub gas: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub gas_price: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub max_fee_per_gas: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub max_priority_fee_per_gas: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub v: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub r: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub s: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub y_parity: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub chain_id: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub contract_address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub gas_used: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub cumulative_gas_used: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub effective_gas_price: bool,
    #[serde(rename = "type", skip_serializing_if = "is_false")]
    pub kind: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub status: bool,
}

impl TxFieldSelection {
    /// Selects every transaction field.
    pub fn all() -> Self {
        Self {
            transaction_index: true,
            hash: true,
            nonce: true,
            from: true,
            to: true,
            input: true,
            value: true,
            gas: true,
            gas_price: true,
            max_fee_per_gas: true,
            max_priority_fee_per_gas: true,
            v: true,
            r: true,
            s: true,
            y_parity: true,
            chain_id: true,
            contract_address: true,
            gas_used: true,
            cumulative_gas_used: true,
            effective_gas_price: true,
            kind: true,
            status: true,
        }
    }
}

/// Per-field projection over event logs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFieldSelection {
    #[serde(skip_serializing_if = "is_false")]
    pub log_index: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub transaction_index: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub transaction_hash: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub data: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub topics: bool,
}

impl LogFieldSelection {
    /// Selects every log field.
    pub fn all() -> Self {
        Self {
            log_index: true,
            transaction_index: true,
            transaction_hash: true,
            address: true,
            data: true,
            topics: true,
        }
    }
}

/// Per-field projection over execution traces.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceFieldSelection {
    #[serde(skip_serializing_if = "is_false")]
    pub trace_address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub subtraces: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub transaction_index: bool,
    #[serde(rename = "type", skip_serializing_if = "is_false")]
    pub kind: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub error: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub revert_reason: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_from: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_value: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_gas: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_init: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_result_gas_used: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_result_code: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_result_address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub call_from: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub call_to: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub call_value: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub call_gas: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub call_input: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub call_sighash: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub call_type: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub call_result_gas_used: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub call_result_output: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub suicide_address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub suicide_refund_address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub suicide_balance: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub reward_author: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub reward_value: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub reward_type: bool,
}

impl TraceFieldSelection {
    /// Just enough to tie a create trace back to its transaction and the
    /// address it deployed.
    pub fn create_identity() -> Self {
        Self { transaction_index: true, kind: true, create_result_address: true, ..Self::default() }
    }

    /// Selects every trace field.
    pub fn all() -> Self {
        Self {
            trace_address: true,
            subtraces: true,
            transaction_index: true,
            kind: true,
            error: true,
            revert_reason: true,
            create_from: true,
            create_value: true,
            create_gas: true,
            create_init: true,
            create_result_gas_used: true,
            create_result_code: true,
            create_result_address: true,
            call_from: true,
            call_to: true,
            call_value: true,
            call_gas: true,
            call_input: true,
            call_sighash: true,
            call_type: true,
            call_result_gas_used: true,
            call_result_output: true,
            suicide_address: true,
            suicide_refund_address: true,
            suicide_balance: true,
            reward_author: true,
            reward_value: true,
            reward_type: true,
        }
    }
}

/// Projections for each record kind a query may return.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockFieldSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TxFieldSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<LogFieldSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceFieldSelection>,
}

/// Transaction filter entry. Entries of the same kind OR-combine; all
/// filters AND-combine with the block range.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub from: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sighash: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_nonce: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_nonce: Option<u64>,
    /// Also return the logs of matching transactions.
    #[serde(skip_serializing_if = "is_false")]
    pub logs: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub traces: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub state_diffs: bool,
}

/// Log filter entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topic0: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topic1: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topic2: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topic3: Vec<String>,
    /// Also return the transaction each matching log belongs to.
    #[serde(skip_serializing_if = "is_false")]
    pub transaction: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub transaction_traces: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub transaction_logs: bool,
}

/// Trace filter entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRequest {
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub kind: Vec<TraceType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub create_result_address: Vec<String>,
    /// Also return the transaction each matching trace belongs to.
    #[serde(skip_serializing_if = "is_false")]
    pub transaction: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub transaction_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceType {
    Create,
    Call,
    Reward,
    Suicide,
}

/// One archive request: a block range, a field projection, and filter
/// collections. The pagination engine advances `from_block` in place;
/// everything else stays fixed for the lifetime of the request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub from_block: u64,
    /// Inclusive upper bound; `None` scans until the caller stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<u64>,
    /// Forces empty blocks into the response, needed when contiguity of
    /// block numbers matters.
    #[serde(skip_serializing_if = "is_false")]
    pub include_all_blocks: bool,
    pub fields: FieldSelection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<TxRequest>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<LogRequest>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub traces: Vec<TraceRequest>,
}

/// One block's worth of response data. Record lists are present only if
/// something matched in that block; header fields beyond `number` and
/// `hash` only if the projection asked for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub header: Option<BlockHeader>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub logs: Vec<Log>,
    #[serde(default)]
    pub traces: Vec<Trace>,
}

/// Raw block header. `number` and `hash` are always served by the
/// archive (pagination depends on them); everything else follows the
/// field selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    pub number: u64,
    pub hash: String,
    pub parent_hash: Option<String>,
    pub size: Option<u64>,
    pub sha3_uncles: Option<String>,
    pub miner: Option<String>,
    pub state_root: Option<String>,
    pub transactions_root: Option<String>,
    pub receipts_root: Option<String>,
    pub logs_bloom: Option<String>,
    pub difficulty: Option<String>,
    pub total_difficulty: Option<String>,
    pub gas_limit: Option<String>,
    pub gas_used: Option<String>,
    /// The archive serves this as a JSON float.
    pub timestamp: Option<f64>,
    pub extra_data: Option<String>,
    pub mix_hash: Option<String>,
    pub nonce: Option<String>,
    pub base_fee_per_gas: Option<String>,
}

/// Raw transaction with its receipt fields merged in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_index: Option<u64>,
    pub hash: Option<String>,
    pub nonce: Option<u64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub input: Option<String>,
    pub value: Option<String>,
    pub gas: Option<String>,
    pub gas_price: Option<String>,
    pub max_fee_per_gas: Option<String>,
    pub max_priority_fee_per_gas: Option<String>,
    pub v: Option<String>,
    pub r: Option<String>,
    pub s: Option<String>,
    pub y_parity: Option<u64>,
    pub chain_id: Option<u64>,
    pub contract_address: Option<String>,
    pub gas_used: Option<String>,
    pub cumulative_gas_used: Option<String>,
    pub effective_gas_price: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<u8>,
    pub status: Option<u8>,
}

/// Raw event log.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Option<String>,
    pub transaction_index: Option<u64>,
    pub transaction_hash: Option<String>,
    pub log_index: Option<u64>,
    pub data: Option<String>,
    pub topics: Option<Vec<String>>,
}

/// Raw execution trace. Only create traces carry a `result`, and only
/// when the creation succeeded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: Option<TraceType>,
    pub transaction_index: Option<u64>,
    pub result: Option<TraceCreateResult>,
}

/// Outcome of a successful contract creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceCreateResult {
    pub gas_used: Option<u64>,
    pub code: Option<String>,
    pub address: Option<String>,
}
