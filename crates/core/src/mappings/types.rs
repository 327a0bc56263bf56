use alloy::primitives::{Address, Bytes, B256, B64, U256};

/// Fully decoded block header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub number: u64,
    pub hash: B256,
    pub parent_hash: B256,
    /// Absent on pre-fee-market blocks.
    pub base_fee_per_gas: Option<U256>,
    pub difficulty: U256,
    pub total_difficulty: U256,
    pub extra_data: Bytes,
    pub gas_limit: U256,
    pub gas_used: U256,
    pub logs_bloom: Bytes,
    pub miner: Address,
    pub mix_hash: B256,
    pub nonce: B64,
    pub receipts_root: B256,
    pub sha3_uncles: B256,
    pub size: u64,
    pub state_root: B256,
    pub timestamp: u64,
    pub transactions_root: B256,
}

/// Transaction receipt joined with its block context and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub block_number: u64,
    pub block_hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    pub hash: B256,
    pub status: u8,
    pub chain_id: Option<u64>,
    /// Set when the transaction deployed a contract.
    pub contract_address: Option<Address>,
    pub cumulative_gas_used: U256,
    pub effective_gas_price: U256,
    pub gas: U256,
    pub gas_price: U256,
    pub gas_used: U256,
    pub input: Bytes,
    /// Absent on pre-fee-market transactions.
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
    pub nonce: u64,
    pub v: U256,
    pub r: Bytes,
    pub s: Bytes,
    pub transaction_index: u64,
    pub transaction_type: u8,
    pub value: U256,
    pub y_parity: Option<u64>,
    /// Logs emitted by this transaction, in log-index order.
    pub logs: Vec<LogRecord>,
}

/// Event log joined with its block context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub block_number: u64,
    pub block_hash: B256,
    pub address: Address,
    pub transaction_index: u64,
    pub transaction_hash: B256,
    pub log_index: u64,
    pub data: Bytes,
    pub topics: Vec<B256>,
}
