//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits so the same structure can be read from a
//! TOML file before environment overrides are applied.

use serde::{Deserialize, Serialize};

/// Root configuration for the webfinger proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Upstream service the webfinger document is fetched from.
    pub upstream: UpstreamConfig,

    /// Href rewrite parameters.
    pub rewrite: RewriteConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// Address in `host:port` form, suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL prepended to the incoming path and query.
    /// Joined by plain concatenation, so it should not end with `/`.
    pub url: String,
}

/// Href rewrite configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RewriteConfig {
    /// Literal substring to locate inside `href` values.
    pub pattern: String,

    /// Literal text that replaces the pattern and the segment after it.
    pub replacement: String,

    /// Suffix used when the request carries no `X-Issuer-Suffix` header.
    pub default_suffix: String,
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub upstream_connect_secs: u64,

    /// Upstream request timeout (connect, headers and body) in seconds.
    pub upstream_secs: u64,

    /// Inbound request timeout in seconds. Must exceed `upstream_secs` so a
    /// slow upstream surfaces as a 502 rather than the inbound timeout.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_connect_secs: 5,
            upstream_secs: 30,
            request_secs: 35,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Prometheus metrics endpoint bind address. Metrics are off when unset.
    pub metrics_address: Option<String>,
}
