mod support;

use std::sync::Arc;

use alloy::primitives::{Address, B256};
use serde_json::json;
use sqd_archive_core::{ContractEventQuery, QueryEngine};
use support::*;

fn emitter() -> Address {
    Address::repeat_byte(0x9a)
}

#[tokio::test]
async fn test_logs_come_out_in_block_and_index_order() -> anyhow::Result<()> {
    let stub = StubArchive::new(500);
    let address = address_hex(0x9a);
    stub.push_chunk(json!([block_json(
        40,
        vec![],
        vec![log_json(0, 0, &address), log_json(2, 1, &address)],
        vec![],
    )]));
    stub.push_chunk(json!([block_json(41, vec![], vec![log_json(1, 0, &address)], vec![])]));
    let base = serve(Arc::clone(&stub)).await;
    let engine = QueryEngine::new(test_gateway(&base));

    let mut scan = engine.contract_events(
        "ethereum-mainnet",
        &ContractEventQuery {
            contracts: vec![emitter()],
            topic0: None,
            start_block: 40,
            stop_block: 41,
        },
    );

    let mut positions = Vec::new();
    while let Some(log) = scan.try_next().await? {
        assert_eq!(log.address, emitter());
        positions.push((log.block_number, log.log_index));
    }
    assert_eq!(positions, vec![(40, 0), (40, 1), (41, 0)]);
    assert_eq!(stub.query_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_filter_carries_addresses_and_optional_topic0() -> anyhow::Result<()> {
    let stub = StubArchive::new(500);
    stub.push_chunk(json!([block_json(41, vec![], vec![], vec![])]));
    let base = serve(Arc::clone(&stub)).await;
    let engine = QueryEngine::new(test_gateway(&base));

    let topic = B256::repeat_byte(0xab);
    let mut scan = engine.contract_events(
        "ethereum-mainnet",
        &ContractEventQuery {
            contracts: vec![emitter()],
            topic0: Some(vec![topic]),
            start_block: 40,
            stop_block: 41,
        },
    );
    assert!(scan.try_next().await?.is_none());

    let body = stub.recorded_query(0);
    assert_eq!(body["logs"], json!([{
        "address": [address_hex(0x9a)],
        "topic0": [word_hex(0xab)],
    }]));
    assert_eq!(body["fields"]["log"], json!({
        "logIndex": true,
        "transactionIndex": true,
        "transactionHash": true,
        "address": true,
        "data": true,
        "topics": true,
    }));
    assert!(body.get("transactions").is_none());
    Ok(())
}
