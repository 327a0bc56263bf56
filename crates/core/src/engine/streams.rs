//! Lazy record streams backing the four query kinds.
//!
//! Each scan owns a [`BlockPager`] plus a small buffer of mapped
//! records. A pull drains the buffer first and only then fetches the
//! next chunk, so one HTTP request is in flight at a time and records
//! come out in block order. Scans are single-pass and forward-only; a
//! caller that stops pulling simply drops the scan, and a scan that has
//! reported an error stays finished - records already handed out remain
//! valid, but nothing further is produced.

use std::collections::VecDeque;

use alloy::primitives::{Address, B256};

use super::pagination::BlockPager;
use super::Record;
use crate::codec::{decode_address, decode_b256};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::types::Block;
use crate::mappings::{
    map_header, map_log, map_receipt, map_transaction_logs, require, Header, LogRecord, Receipt,
};

fn block_context(block: &Block) -> GatewayResult<(u64, B256)> {
    let header = block
        .header
        .as_ref()
        .ok_or_else(|| GatewayError::Decoding("block in response has no header".to_string()))?;
    Ok((header.number, decode_b256(&header.hash)?))
}

/// Headers of a closed block range, in ascending order.
pub struct HeaderScan {
    pager: BlockPager,
    buffered: VecDeque<Header>,
    failed: bool,
}

impl HeaderScan {
    pub(super) fn new(pager: BlockPager) -> Self {
        Self { pager, buffered: VecDeque::new(), failed: false }
    }

    pub async fn try_next(&mut self) -> GatewayResult<Option<Header>> {
        if self.failed {
            return Ok(None);
        }
        let next = self.advance().await;
        self.failed = next.is_err();
        next
    }

    async fn advance(&mut self) -> GatewayResult<Option<Header>> {
        loop {
            if let Some(header) = self.buffered.pop_front() {
                return Ok(Some(header));
            }
            let Some(blocks) = self.pager.next_chunk().await? else {
                return Ok(None);
            };
            for block in &blocks {
                let header = block.header.as_ref().ok_or_else(|| {
                    GatewayError::Decoding("block in response has no header".to_string())
                })?;
                self.buffered.push_back(map_header(header)?);
            }
        }
    }
}

/// Receipts of an account's transactions for a nonce range, in block
/// order. Ends right after the `stop_nonce` receipt.
pub struct AccountTxScan {
    pager: BlockPager,
    buffered: VecDeque<Receipt>,
    start_nonce: u64,
    stop_nonce: u64,
    done: bool,
    failed: bool,
}

impl AccountTxScan {
    pub(super) fn new(pager: BlockPager, start_nonce: u64, stop_nonce: u64) -> Self {
        Self {
            pager,
            buffered: VecDeque::new(),
            start_nonce,
            stop_nonce,
            done: false,
            failed: false,
        }
    }

    pub async fn try_next(&mut self) -> GatewayResult<Option<Receipt>> {
        if self.failed {
            return Ok(None);
        }
        let next = self.advance().await;
        self.failed = next.is_err();
        next
    }

    async fn advance(&mut self) -> GatewayResult<Option<Receipt>> {
        loop {
            if let Some(receipt) = self.buffered.pop_front() {
                return Ok(Some(receipt));
            }
            if self.done {
                return Ok(None);
            }
            let Some(blocks) = self.pager.next_chunk().await? else {
                return Ok(None);
            };
            'blocks: for block in &blocks {
                let (block_number, block_hash) = block_context(block)?;
                for tx in &block.transactions {
                    let nonce = require(tx.nonce, "nonce")?;
                    // The worker promised to filter on the nonce range;
                    // a transaction outside it is a contract breach.
                    if nonce < self.start_nonce || nonce > self.stop_nonce {
                        return Err(GatewayError::Protocol(format!(
                            "transaction nonce {nonce} is outside the requested range {}..={}",
                            self.start_nonce, self.stop_nonce
                        )));
                    }
                    let transaction_index = require(tx.transaction_index, "transactionIndex")?;
                    let logs = map_transaction_logs(
                        &block.logs,
                        transaction_index,
                        block_number,
                        block_hash,
                    )?;
                    self.buffered.push_back(map_receipt(tx, block_number, block_hash, logs)?);
                    if nonce == self.stop_nonce {
                        self.done = true;
                        break 'blocks;
                    }
                }
            }
        }
    }
}

/// Search for the transaction that deployed a contract. Yields at most
/// one receipt, then ends.
pub struct ContractCreationScan {
    pager: BlockPager,
    contract: Address,
    done: bool,
}

impl ContractCreationScan {
    pub(super) fn new(pager: BlockPager, contract: Address) -> Self {
        Self { pager, contract, done: false }
    }

    pub async fn try_next(&mut self) -> GatewayResult<Option<Receipt>> {
        if self.done {
            return Ok(None);
        }
        let next = self.advance().await;
        // One yielded receipt or any error finishes the search.
        self.done = !matches!(next, Ok(None));
        next
    }

    async fn advance(&mut self) -> GatewayResult<Option<Receipt>> {
        loop {
            let Some(blocks) = self.pager.next_chunk().await? else {
                return Ok(None);
            };
            for block in &blocks {
                for trace in &block.traces {
                    // A create trace without a result is a failed
                    // creation; the scan moves on.
                    let Some(result) = trace.result.as_ref() else {
                        continue;
                    };
                    let created =
                        decode_address(require(result.address.as_deref(), "result.address")?)?;
                    if created != self.contract {
                        return Err(GatewayError::Protocol(format!(
                            "worker returned a create trace for {created}, expected {}",
                            self.contract
                        )));
                    }
                    let (block_number, block_hash) = block_context(block)?;
                    let transaction_index = require(trace.transaction_index, "transactionIndex")?;
                    let tx = block
                        .transactions
                        .iter()
                        .find(|tx| tx.transaction_index == Some(transaction_index))
                        .ok_or_else(|| {
                            GatewayError::Protocol(format!(
                                "create trace in block {block_number} references transaction \
                                 {transaction_index} that the worker did not return"
                            ))
                        })?;
                    let logs = map_transaction_logs(
                        &block.logs,
                        transaction_index,
                        block_number,
                        block_hash,
                    )?;
                    return Ok(Some(map_receipt(tx, block_number, block_hash, logs)?));
                }
            }
        }
    }
}

/// Event logs of a contract set over a closed block range, in block and
/// log-index order.
pub struct ContractEventScan {
    pager: BlockPager,
    buffered: VecDeque<LogRecord>,
    failed: bool,
}

impl ContractEventScan {
    pub(super) fn new(pager: BlockPager) -> Self {
        Self { pager, buffered: VecDeque::new(), failed: false }
    }

    pub async fn try_next(&mut self) -> GatewayResult<Option<LogRecord>> {
        if self.failed {
            return Ok(None);
        }
        let next = self.advance().await;
        self.failed = next.is_err();
        next
    }

    async fn advance(&mut self) -> GatewayResult<Option<LogRecord>> {
        loop {
            if let Some(log) = self.buffered.pop_front() {
                return Ok(Some(log));
            }
            let Some(blocks) = self.pager.next_chunk().await? else {
                return Ok(None);
            };
            for block in &blocks {
                let (block_number, block_hash) = block_context(block)?;
                for log in &block.logs {
                    self.buffered.push_back(map_log(log, block_number, block_hash)?);
                }
            }
        }
    }
}

/// Union of the four scans, yielding [`Record`]s.
pub enum RecordScan {
    Blocks(HeaderScan),
    AccountTransactions(AccountTxScan),
    ContractCreation(ContractCreationScan),
    ContractEvents(ContractEventScan),
}

impl RecordScan {
    pub async fn try_next(&mut self) -> GatewayResult<Option<Record>> {
        match self {
            RecordScan::Blocks(scan) => Ok(scan.try_next().await?.map(Record::Header)),
            RecordScan::AccountTransactions(scan) => {
                Ok(scan.try_next().await?.map(Record::Receipt))
            }
            RecordScan::ContractCreation(scan) => Ok(scan.try_next().await?.map(Record::Receipt)),
            RecordScan::ContractEvents(scan) => Ok(scan.try_next().await?.map(Record::Log)),
        }
    }
}
