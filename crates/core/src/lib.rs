//! Query engine for a sharded, range-partitioned blockchain archive.
//!
//! The archive splits history across worker shards that each own a
//! contiguous block range. This crate turns high-level range queries
//! into the archive's structured query protocol: it resolves the worker
//! owning each range, rides out transient 503 backpressure with a
//! bounded backoff, paginates chunk by chunk until a request is served,
//! and decodes the hex-encoded payloads into typed records.

pub mod codec;
mod engine;
mod error;
pub mod gateway;
mod logger;
pub mod mappings;
pub mod networks;

pub use engine::{
    AccountTransactionQuery, AccountTxScan, BlockPager, BlockRangeQuery, ContractCreationQuery,
    ContractCreationScan, ContractEventQuery, ContractEventScan, EngineQuery, HeaderScan,
    QueryEngine, Record, RecordScan,
};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{ArchiveGateway, GatewayConfig, DEFAULT_GATEWAY_URL};
pub use logger::{setup_info_logger, setup_logger};
