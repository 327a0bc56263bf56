use std::sync::Arc;

use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::types::{Block, Query};
use crate::gateway::ArchiveGateway;

/// Drives one query across successive worker chunks.
///
/// Each pull resolves the worker owning the cursor, fetches a single
/// chunk, and advances the cursor past the last block it covered. Chunk
/// N+1 is never requested before chunk N has been handed out, so blocks
/// arrive in strict order.
pub struct BlockPager {
    gateway: Arc<ArchiveGateway>,
    network: String,
    query: Query,
    started: bool,
    exhausted: bool,
}

impl BlockPager {
    pub fn new(gateway: Arc<ArchiveGateway>, network: &str, query: Query) -> Self {
        Self { gateway, network: network.to_string(), query, started: false, exhausted: false }
    }

    /// Fetches the next chunk, or `None` once the bounded range has been
    /// served. Unbounded queries keep producing chunks until the caller
    /// stops pulling.
    ///
    /// The first pull of a bounded query validates the range against the
    /// network height and fails with `RangeUnavailable` before touching
    /// any worker.
    pub async fn next_chunk(&mut self) -> GatewayResult<Option<Vec<Block>>> {
        if self.exhausted {
            return Ok(None);
        }

        if !self.started {
            self.started = true;
            if let Some(stop) = self.query.to_block {
                let height = self.gateway.get_height(&self.network).await?;
                if stop > height {
                    self.exhausted = true;
                    return Err(GatewayError::RangeUnavailable {
                        start: self.query.from_block,
                        stop,
                        height,
                    });
                }
            }
        }

        let blocks = self.gateway.query(&self.network, &self.query).await?;
        let last = blocks.last().ok_or_else(|| {
            GatewayError::Protocol(format!(
                "worker returned an empty chunk for blocks starting at {}",
                self.query.from_block
            ))
        })?;
        let last_number = last
            .header
            .as_ref()
            .map(|header| header.number)
            .ok_or_else(|| GatewayError::Decoding("chunk's last block has no header".to_string()))?;

        if self.query.to_block.is_some_and(|stop| last_number >= stop) {
            self.exhausted = true;
        }
        debug!("chunk covered blocks {}..={}", self.query.from_block, last_number);
        self.query.from_block = last_number + 1;

        Ok(Some(blocks))
    }
}
