//! Stub archive gateway for driving the engine end to end.
//!
//! One axum server plays gateway and worker at the same time: worker
//! resolution always points back at the stub's own `/data` route, which
//! serves scripted responses first and queued chunks after.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use sqd_archive_core::{ArchiveGateway, GatewayConfig};

#[derive(Default)]
pub struct StubArchive {
    height: u64,
    chunks: Mutex<VecDeque<Value>>,
    queries: Mutex<Vec<Value>>,
    worker_calls: AtomicUsize,
    height_calls: AtomicUsize,
    scripted: Mutex<VecDeque<(u16, String)>>,
    base: OnceLock<String>,
}

impl StubArchive {
    pub fn new(height: u64) -> Arc<Self> {
        Arc::new(Self { height, ..Default::default() })
    }

    /// Queues one chunk for the `/data` route.
    pub fn push_chunk(&self, chunk: Value) {
        self.chunks.lock().unwrap().push_back(chunk);
    }

    /// Queues a raw status/body response served before any chunk.
    pub fn push_data_response(&self, status: u16, body: &str) {
        self.scripted.lock().unwrap().push_back((status, body.to_string()));
    }

    pub fn query_calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn worker_calls(&self) -> usize {
        self.worker_calls.load(Ordering::SeqCst)
    }

    pub fn height_calls(&self) -> usize {
        self.height_calls.load(Ordering::SeqCst)
    }

    pub fn recorded_query(&self, index: usize) -> Value {
        self.queries.lock().unwrap()[index].clone()
    }
}

/// Binds the stub on an ephemeral port and returns its base URL.
pub async fn serve(stub: Arc<StubArchive>) -> String {
    let router = Router::new()
        .route("/network/{network}/height", get(height))
        .route("/network/{network}/{block}/worker", get(worker))
        .route("/data", post(data))
        .with_state(Arc::clone(&stub));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    stub.base.set(base.clone()).unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base
}

async fn height(State(stub): State<Arc<StubArchive>>) -> String {
    stub.height_calls.fetch_add(1, Ordering::SeqCst);
    stub.height.to_string()
}

async fn worker(
    State(stub): State<Arc<StubArchive>>,
    Path((_network, _block)): Path<(String, u64)>,
) -> String {
    stub.worker_calls.fetch_add(1, Ordering::SeqCst);
    format!("{}/data", stub.base.get().unwrap())
}

async fn data(State(stub): State<Arc<StubArchive>>, Json(query): Json<Value>) -> Response {
    stub.queries.lock().unwrap().push(query);
    if let Some((status, body)) = stub.scripted.lock().unwrap().pop_front() {
        return (StatusCode::from_u16(status).unwrap(), body).into_response();
    }
    match stub.chunks.lock().unwrap().pop_front() {
        Some(chunk) => Json(chunk).into_response(),
        None => {
            (StatusCode::INTERNAL_SERVER_ERROR, "stub ran out of chunks".to_string()).into_response()
        }
    }
}

/// Gateway pointed at the stub, with a compressed retry schedule so
/// retry paths run in milliseconds.
pub fn test_gateway(base_url: &str) -> Arc<ArchiveGateway> {
    Arc::new(ArchiveGateway::new(test_config(base_url)))
}

pub fn test_config(base_url: &str) -> GatewayConfig {
    GatewayConfig {
        base_url: base_url.to_string(),
        retry_schedule: [1, 2, 3].map(Duration::from_millis).to_vec(),
        ..GatewayConfig::default()
    }
}

pub fn word_hex(byte: u8) -> String {
    format!("0x{}", format!("{byte:02x}").repeat(32))
}

pub fn address_hex(byte: u8) -> String {
    format!("0x{}", format!("{byte:02x}").repeat(20))
}

pub fn block_hash_hex(number: u64) -> String {
    format!("0x{number:064x}")
}

/// Header with every field populated, hash derived from the number.
pub fn header_json(number: u64) -> Value {
    json!({
        "number": number,
        "hash": block_hash_hex(number),
        "parentHash": block_hash_hex(number.wrapping_sub(1)),
        "size": 1000 + number,
        "sha3Uncles": word_hex(0xcc),
        "miner": address_hex(0xdd),
        "stateRoot": word_hex(0xee),
        "transactionsRoot": word_hex(0x1f),
        "receiptsRoot": word_hex(0x2f),
        "logsBloom": "0x00",
        "difficulty": "0x2",
        "totalDifficulty": "0xc70d815d562d3cfa955",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x5208",
        "timestamp": 1_700_000_000.0 + number as f64,
        "extraData": "0x",
        "mixHash": word_hex(0x3f),
        "nonce": "0x0000000000000042",
        "baseFeePerGas": "0x7",
    })
}

pub fn tx_json(transaction_index: u64, nonce: u64, from: &str) -> Value {
    json!({
        "transactionIndex": transaction_index,
        "hash": word_hex(0x4a),
        "nonce": nonce,
        "from": from,
        "to": address_hex(0x6a),
        "input": "0x",
        "value": "0x0",
        "gas": "0x5208",
        "gasPrice": "0x7",
        "maxFeePerGas": null,
        "maxPriorityFeePerGas": null,
        "v": "0x1",
        "r": "0x01",
        "s": "0x01",
        "yParity": 1,
        "chainId": 1,
        "contractAddress": null,
        "gasUsed": "0x5208",
        "cumulativeGasUsed": "0x5208",
        "effectiveGasPrice": "0x7",
        "type": 2,
        "status": 1,
    })
}

pub fn log_json(transaction_index: u64, log_index: u64, address: &str) -> Value {
    json!({
        "address": address,
        "transactionIndex": transaction_index,
        "transactionHash": word_hex(0x4a),
        "logIndex": log_index,
        "data": "0xdeadbeef",
        "topics": [word_hex(0xab)],
    })
}

/// Create trace; `result_address` of `None` models a failed creation.
pub fn create_trace_json(transaction_index: u64, result_address: Option<&str>) -> Value {
    match result_address {
        Some(address) => json!({
            "type": "create",
            "transactionIndex": transaction_index,
            "result": {"gasUsed": 32000, "code": "0x60", "address": address},
        }),
        None => json!({"type": "create", "transactionIndex": transaction_index}),
    }
}

pub fn block_json(number: u64, transactions: Vec<Value>, logs: Vec<Value>, traces: Vec<Value>) -> Value {
    json!({
        "header": header_json(number),
        "transactions": transactions,
        "logs": logs,
        "traces": traces,
    })
}
