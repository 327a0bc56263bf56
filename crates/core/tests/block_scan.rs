mod support;

use std::sync::Arc;

use serde_json::json;
use sqd_archive_core::{BlockRangeQuery, EngineQuery, QueryEngine, Record};
use support::*;

#[tokio::test]
async fn test_bounded_range_yields_every_header_in_order() -> anyhow::Result<()> {
    let stub = StubArchive::new(500);
    for number in 100..=102u64 {
        stub.push_chunk(json!([block_json(number, vec![], vec![], vec![])]));
    }
    let base = serve(Arc::clone(&stub)).await;
    let engine = QueryEngine::new(test_gateway(&base));

    let mut scan =
        engine.blocks("ethereum-mainnet", &BlockRangeQuery { start_block: 100, stop_block: 102 });
    let mut numbers = Vec::new();
    while let Some(header) = scan.try_next().await? {
        numbers.push(header.number);
    }

    // Three single-block chunks, three fetches, not a fourth.
    assert_eq!(numbers, vec![100, 101, 102]);
    assert_eq!(stub.query_calls(), 3);
    assert_eq!(stub.worker_calls(), 3);
    Ok(())
}

#[tokio::test]
async fn test_cursor_advances_past_each_chunk() -> anyhow::Result<()> {
    let stub = StubArchive::new(500);
    stub.push_chunk(json!([
        block_json(100, vec![], vec![], vec![]),
        block_json(101, vec![], vec![], vec![]),
    ]));
    stub.push_chunk(json!([block_json(102, vec![], vec![], vec![])]));
    let base = serve(Arc::clone(&stub)).await;
    let engine = QueryEngine::new(test_gateway(&base));

    let mut scan =
        engine.blocks("ethereum-mainnet", &BlockRangeQuery { start_block: 100, stop_block: 102 });
    let mut numbers = Vec::new();
    while let Some(header) = scan.try_next().await? {
        numbers.push(header.number);
    }
    assert_eq!(numbers, vec![100, 101, 102]);

    let first = stub.recorded_query(0);
    assert_eq!(first["fromBlock"], json!(100));
    assert_eq!(first["toBlock"], json!(102));
    assert_eq!(first["includeAllBlocks"], json!(true));
    // Full header projection goes out with the request.
    assert_eq!(first["fields"]["block"]["number"], json!(true));
    assert_eq!(first["fields"]["block"]["totalDifficulty"], json!(true));
    assert!(first.get("transactions").is_none());

    // The second fetch starts past everything the first chunk covered.
    let second = stub.recorded_query(1);
    assert_eq!(second["fromBlock"], json!(102));
    Ok(())
}

#[tokio::test]
async fn test_perform_dispatches_block_queries() -> anyhow::Result<()> {
    let stub = StubArchive::new(500);
    stub.push_chunk(json!([block_json(7, vec![], vec![], vec![])]));
    let base = serve(Arc::clone(&stub)).await;
    let engine = QueryEngine::new(test_gateway(&base));

    let mut scan = engine.perform(
        "ethereum-mainnet",
        EngineQuery::Blocks(BlockRangeQuery { start_block: 7, stop_block: 7 }),
    );
    match scan.try_next().await? {
        Some(Record::Header(header)) => assert_eq!(header.number, 7),
        other => panic!("expected a header record, got {other:?}"),
    }
    assert!(scan.try_next().await?.is_none());
    Ok(())
}
