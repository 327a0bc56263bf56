//! The query engine façade: four query kinds over one pagination core.

mod pagination;
mod streams;

pub use pagination::BlockPager;
pub use streams::{
    AccountTxScan, ContractCreationScan, ContractEventScan, HeaderScan, RecordScan,
};

use std::sync::Arc;

use alloy::primitives::{Address, B256};

use crate::error::GatewayResult;
use crate::gateway::types::{
    BlockFieldSelection, FieldSelection, LogFieldSelection, LogRequest, Query,
    TraceFieldSelection, TraceRequest, TraceType, TxFieldSelection, TxRequest,
};
use crate::gateway::ArchiveGateway;
use crate::mappings::{Header, LogRecord, Receipt};

/// Every header from `start_block` to `stop_block`, inclusive.
#[derive(Debug, Clone)]
pub struct BlockRangeQuery {
    pub start_block: u64,
    pub stop_block: u64,
}

/// Transactions sent by `account` with nonces in
/// `[start_nonce, stop_nonce]`.
#[derive(Debug, Clone)]
pub struct AccountTransactionQuery {
    pub account: Address,
    pub start_nonce: u64,
    pub stop_nonce: u64,
}

/// Search for the transaction that deployed `contract` within a block
/// range.
#[derive(Debug, Clone)]
pub struct ContractCreationQuery {
    pub contract: Address,
    pub start_block: u64,
    pub stop_block: u64,
}

/// Events emitted by any of `contracts` within a block range, optionally
/// narrowed to a set of topic0 signatures. Event payloads are decoded by
/// the host, not here.
#[derive(Debug, Clone)]
pub struct ContractEventQuery {
    pub contracts: Vec<Address>,
    pub topic0: Option<Vec<B256>>,
    pub start_block: u64,
    pub stop_block: u64,
}

/// The query kinds the engine answers.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    Blocks(BlockRangeQuery),
    AccountTransactions(AccountTransactionQuery),
    ContractCreation(ContractCreationQuery),
    ContractEvents(ContractEventQuery),
}

/// A record produced by [`QueryEngine::perform`].
#[derive(Debug, Clone)]
pub enum Record {
    Header(Header),
    Receipt(Receipt),
    Log(LogRecord),
}

/// Entry point for archive queries.
///
/// Handlers build the wire query for their kind and hand it to the
/// pagination engine; records come back as lazy pull streams.
pub struct QueryEngine {
    gateway: Arc<ArchiveGateway>,
}

impl QueryEngine {
    pub fn new(gateway: Arc<ArchiveGateway>) -> Self {
        Self { gateway }
    }

    /// Dispatches a query to its handler.
    pub fn perform(&self, network: &str, query: EngineQuery) -> RecordScan {
        match query {
            EngineQuery::Blocks(query) => RecordScan::Blocks(self.blocks(network, &query)),
            EngineQuery::AccountTransactions(query) => {
                RecordScan::AccountTransactions(self.account_transactions(network, &query))
            }
            EngineQuery::ContractCreation(query) => {
                RecordScan::ContractCreation(self.contract_creation(network, &query))
            }
            EngineQuery::ContractEvents(query) => {
                RecordScan::ContractEvents(self.contract_events(network, &query))
            }
        }
    }

    /// Scans a closed block range and yields every header in order.
    ///
    /// Empty blocks are forced into the response so the numbers stay
    /// contiguous.
    pub fn blocks(&self, network: &str, query: &BlockRangeQuery) -> HeaderScan {
        let body = Query {
            from_block: query.start_block,
            to_block: Some(query.stop_block),
            include_all_blocks: true,
            fields: FieldSelection {
                block: Some(BlockFieldSelection::all()),
                ..Default::default()
            },
            ..Default::default()
        };
        HeaderScan::new(self.pager(network, body))
    }

    /// Scans forward from genesis for an account's transactions and
    /// yields their receipts, logs joined. The scan is open-ended; it
    /// ends once the `stop_nonce` transaction has been yielded.
    pub fn account_transactions(
        &self,
        network: &str,
        query: &AccountTransactionQuery,
    ) -> AccountTxScan {
        let body = Query {
            from_block: 0,
            fields: FieldSelection {
                transaction: Some(TxFieldSelection::all()),
                log: Some(LogFieldSelection::all()),
                ..Default::default()
            },
            transactions: vec![TxRequest {
                from: vec![filter_address(&query.account)],
                first_nonce: Some(query.start_nonce),
                last_nonce: Some(query.stop_nonce),
                logs: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        AccountTxScan::new(self.pager(network, body), query.start_nonce, query.stop_nonce)
    }

    /// Searches a closed block range for the create trace that deployed
    /// the contract and yields the deploying transaction's receipt.
    pub fn contract_creation(
        &self,
        network: &str,
        query: &ContractCreationQuery,
    ) -> ContractCreationScan {
        let body = Query {
            from_block: query.start_block,
            to_block: Some(query.stop_block),
            fields: FieldSelection {
                transaction: Some(TxFieldSelection::all()),
                log: Some(LogFieldSelection::all()),
                trace: Some(TraceFieldSelection::create_identity()),
                ..Default::default()
            },
            traces: vec![TraceRequest {
                kind: vec![TraceType::Create],
                create_result_address: vec![filter_address(&query.contract)],
                transaction: true,
                transaction_logs: true,
            }],
            ..Default::default()
        };
        ContractCreationScan::new(self.pager(network, body), query.contract)
    }

    /// Scans a closed block range for the contracts' event logs.
    pub fn contract_events(&self, network: &str, query: &ContractEventQuery) -> ContractEventScan {
        let body = Query {
            from_block: query.start_block,
            to_block: Some(query.stop_block),
            fields: FieldSelection { log: Some(LogFieldSelection::all()), ..Default::default() },
            logs: vec![LogRequest {
                address: query.contracts.iter().map(filter_address).collect(),
                topic0: query
                    .topic0
                    .as_ref()
                    .map(|topics| topics.iter().map(|topic| format!("{topic:#x}")).collect())
                    .unwrap_or_default(),
                ..Default::default()
            }],
            ..Default::default()
        };
        ContractEventScan::new(self.pager(network, body))
    }

    /// Current archive height for `network`, served from the short-TTL
    /// cache.
    pub async fn network_height(&self, network: &str) -> GatewayResult<u64> {
        self.gateway.get_height(network).await
    }

    fn pager(&self, network: &str, query: Query) -> BlockPager {
        BlockPager::new(Arc::clone(&self.gateway), network, query)
    }
}

/// The archive matches filters on the lower-case hex form of an address.
fn filter_address(address: &Address) -> String {
    format!("{address:#x}")
}
