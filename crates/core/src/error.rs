use reqwest::StatusCode;
use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure surface of the archive client.
///
/// HTTP 503 responses are retried inside the transport and never show up
/// here unless the retry budget is exhausted; everything else propagates
/// straight to the caller.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The requested range reaches past the chain height the archive
    /// currently knows. Retry later or shrink the range.
    #[error("blocks {start}..={stop} reach past the known network height {height}")]
    RangeUnavailable { start: u64, stop: u64, height: u64 },

    /// A worker exists for the range but has not finished syncing it.
    #[error("worker is not ready to serve the requested block: {0}")]
    NotReadyToServe(String),

    /// The worker does not hold a record kind or field the query asked for.
    #[error("worker has no data for the requested range: {0}")]
    DataUnavailable(String),

    /// Any other non-2xx response the transport could not classify.
    #[error("archive request failed with status {status}: {body}")]
    Service { status: StatusCode, body: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A record could not be decoded, typically because a field the
    /// mapper needs was left out of the field selection.
    #[error("failed to decode archive response: {0}")]
    Decoding(String),

    /// The archive broke a protocol guarantee, e.g. returned an empty
    /// chunk for a non-empty range.
    #[error("archive protocol violation: {0}")]
    Protocol(String),
}
