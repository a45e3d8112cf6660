use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

use crate::{config::UpstreamConfig, error::UpstreamError};

/// The one capability the resolver needs from the outside world: GET a URL
/// and hand back the body.
#[async_trait]
pub trait UpstreamClient: Send + Sync + Debug {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, UpstreamError>;
}

#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    http: Client,
}

impl HttpUpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .context("Failed to build HTTP client for the weather API")?;

        Ok(Self { http })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, UpstreamError> {
        let transport = |source: reqwest::Error| UpstreamError::Transport {
            url: url.to_string(),
            source,
        };

        let res = self.http.get(url).send().await.map_err(transport)?;

        let status = res.status();
        let body = res.bytes().await.map_err(transport)?;

        if !status.is_success() {
            tracing::debug!(%url, %status, body = %truncate_body(&body), "upstream returned non-success status");
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(body.to_vec())
    }
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 200;
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > MAX {
        let head: String = text.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body(b"not found"), "not found");
    }

    #[test]
    fn truncate_body_cuts_long_bodies() {
        let body = "x".repeat(500);
        let out = truncate_body(body.as_bytes());
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn client_builds_with_and_without_timeout() {
        let mut cfg = UpstreamConfig::default();
        assert!(HttpUpstreamClient::new(&cfg).is_ok());

        cfg.timeout_secs = Some(5);
        assert!(HttpUpstreamClient::new(&cfg).is_ok());
    }
}
