use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the upstream weather API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: StatusCode },
}

impl UpstreamError {
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } => url,
        }
    }
}

/// Everything that can go wrong while turning a coordinate into a summary.
///
/// Callers are expected to log the detail and answer with an opaque failure;
/// none of these variants is meant to reach an HTTP client verbatim.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("weather API unreachable: {0}")]
    UpstreamUnreachable(#[from] UpstreamError),

    #[error("malformed response from {url}: {source}")]
    MalformedUpstreamResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no forecast periods available")]
    NoForecastAvailable,

    #[error("failed to encode forecast summary: {0}")]
    ResponseEncodingFailure(#[source] serde_json::Error),
}
