//! Archive gateway: worker resolution, height lookup, and the retrying
//! transport every outbound request goes through.

mod cache;
pub mod types;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::warn;

use crate::error::{GatewayError, GatewayResult};
use self::cache::HeightCache;
use self::types::{Block, Query};

pub const DEFAULT_GATEWAY_URL: &str = "https://v2.archive.subsquid.io";

/// Body substrings the archive embeds when a worker cannot serve a block
/// yet. The wording has drifted across archive releases, so both observed
/// case variants stay listed; an unmatched body is never guessed at and
/// classifies as a plain service error.
const NOT_READY_MARKERS: [&str; 2] = ["not ready to serve block", "Not ready to serve block"];
const DATA_UNAVAILABLE_MARKERS: [&str; 2] = ["is not available", "Is not available"];

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Gateway root used for worker resolution and height lookups.
    pub base_url: String,
    /// Backoff schedule for 503 responses, indexed by attempt number.
    /// Attempts past the end reuse the last entry.
    pub retry_schedule: Vec<Duration>,
    /// How many 503 retries a single request gets before the response is
    /// classified as terminal.
    pub max_retries: usize,
    /// How long a fetched network height stays valid.
    pub height_cache_ttl: Duration,
    /// Body substrings classifying a "worker cannot serve this block yet"
    /// response.
    pub not_ready_markers: Vec<String>,
    /// Body substrings classifying a "worker lacks the requested data"
    /// response.
    pub data_unavailable_markers: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            retry_schedule: [5, 10, 20, 30, 60].map(Duration::from_secs).to_vec(),
            max_retries: 5,
            height_cache_ttl: Duration::from_secs(30),
            not_ready_markers: NOT_READY_MARKERS.map(str::to_string).to_vec(),
            data_unavailable_markers: DATA_UNAVAILABLE_MARKERS.map(str::to_string).to_vec(),
        }
    }
}

/// Client for one archive gateway and the worker shards behind it.
///
/// Holds a single connection pool; share it across queries with an
/// `Arc`. All configuration is injected, there is no global state.
pub struct ArchiveGateway {
    http: Client,
    config: GatewayConfig,
    heights: HeightCache,
}

impl Default for ArchiveGateway {
    fn default() -> Self {
        Self::new(GatewayConfig::default())
    }
}

impl ArchiveGateway {
    pub fn new(config: GatewayConfig) -> Self {
        let heights = HeightCache::new(config.height_cache_ttl);
        Self { http: Client::new(), config, heights }
    }

    /// Resolves the worker shard that owns queries starting at
    /// `start_block`.
    ///
    /// Ownership of a range can shift between calls, so resolution runs
    /// before every chunk fetch and is never cached.
    pub async fn get_worker(&self, network: &str, start_block: u64) -> GatewayResult<String> {
        let url = format!("{}/network/{}/{}/worker", self.base_url(), network, start_block);
        let response = self.send(|| self.http.get(&url)).await?;
        Ok(response.text().await?)
    }

    /// Current chain height as reported by the archive.
    ///
    /// Served from the per-network cache while the last fetch is younger
    /// than the configured TTL; staleness inside that window is by
    /// design.
    pub async fn get_height(&self, network: &str) -> GatewayResult<u64> {
        if let Some(height) = self.heights.get(network).await {
            return Ok(height);
        }

        let url = format!("{}/network/{}/height", self.base_url(), network);
        let response = self.send(|| self.http.get(&url)).await?;
        let text = response.text().await?;
        let height = text.trim().parse::<u64>().map_err(|_| {
            GatewayError::Decoding(format!("height endpoint returned a non-numeric body `{text}`"))
        })?;

        self.heights.insert(network, height).await;
        Ok(height)
    }

    /// Fetches one chunk of blocks: resolves the worker owning
    /// `query.from_block`, then posts the query body to it.
    pub async fn query(&self, network: &str, query: &Query) -> GatewayResult<Vec<Block>> {
        let worker_url = self.get_worker(network, query.from_block).await?;
        let response = self.send(|| self.http.post(&worker_url).json(query)).await?;
        Ok(response.json().await?)
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Sends a request, absorbing 503 backpressure with the configured
    /// backoff schedule. Every other failure is terminal for this call:
    /// non-503 statuses classify by body, transport errors pass through.
    async fn send<F>(&self, build: F) -> GatewayResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut retries = 0;
        loop {
            let response = build().send().await?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::SERVICE_UNAVAILABLE && retries < self.config.max_retries {
                let pause = self.retry_pause(retries);
                retries += 1;
                warn!("archive request failed, will retry in {:?}", pause);
                tokio::time::sleep(pause).await;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(self.classify(status, body));
        }
    }

    fn retry_pause(&self, retries: usize) -> Duration {
        match self.config.retry_schedule.get(retries) {
            Some(pause) => *pause,
            None => self.config.retry_schedule.last().copied().unwrap_or(Duration::ZERO),
        }
    }

    fn classify(&self, status: StatusCode, body: String) -> GatewayError {
        if self.config.not_ready_markers.iter().any(|marker| body.contains(marker.as_str())) {
            GatewayError::NotReadyToServe(body)
        } else if self.config.data_unavailable_markers.iter().any(|m| body.contains(m.as_str())) {
            GatewayError::DataUnavailable(body)
        } else {
            GatewayError::Service { status, body }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_pause_follows_schedule_and_reuses_last() {
        let gateway = ArchiveGateway::default();
        let expected = [5u64, 10, 20, 30, 60, 60, 60];
        for (retries, secs) in expected.iter().enumerate() {
            assert_eq!(gateway.retry_pause(retries), Duration::from_secs(*secs));
        }
    }

    #[test]
    fn test_classify_matches_both_marker_variants() {
        let gateway = ArchiveGateway::default();
        let not_ready = gateway
            .classify(StatusCode::BAD_REQUEST, "Not ready to serve block 100".to_string());
        assert!(matches!(not_ready, GatewayError::NotReadyToServe(_)));
        let not_ready_lower =
            gateway.classify(StatusCode::BAD_REQUEST, "not ready to serve block 100".to_string());
        assert!(matches!(not_ready_lower, GatewayError::NotReadyToServe(_)));

        let unavailable =
            gateway.classify(StatusCode::BAD_REQUEST, "field `traces` Is not available".to_string());
        assert!(matches!(unavailable, GatewayError::DataUnavailable(_)));
    }

    #[test]
    fn test_classify_falls_back_to_service_error() {
        let gateway = ArchiveGateway::default();
        let error = gateway.classify(StatusCode::BAD_GATEWAY, "boom".to_string());
        match error {
            GatewayError::Service { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Service error, got {other:?}"),
        }
    }
}
