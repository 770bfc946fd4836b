//! Upstream fetch.
//!
//! One `GET` per inbound request. The outbound call and its body read are
//! the only points where a request waits; no retries are attempted.

use std::time::Duration;

use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode},
};

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::http::error::ProxyError;

/// A fully buffered upstream response.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Pooled HTTP client bound to the configured upstream base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.upstream_connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: upstream.url.clone(),
        })
    }

    /// Fetch target: base URL followed by the inbound path and query.
    pub fn target(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// `GET` the target and buffer the whole body.
    pub async fn fetch(&self, path_and_query: &str) -> Result<UpstreamResponse, ProxyError> {
        let response = self
            .client
            .get(self.target(path_and_query))
            .send()
            .await
            .map_err(ProxyError::Upstream)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ProxyError::BodyRead)?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
