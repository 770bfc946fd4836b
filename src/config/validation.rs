//! Configuration validation.
//!
//! # Responsibilities
//! - Reject missing required settings (upstream, pattern, replacement, suffix)
//! - Check the upstream URL is an absolute http(s) URL
//! - Validate value ranges (timeouts > 0, inbound timeout above the
//!   upstream one, metrics address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs once at startup, before the listener is bound

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::loader::{
    DEFAULT_SUFFIX_ENV, HREF_PATTERN_ENV, HREF_REPLACEMENT_ENV, UPSTREAM_URL_ENV,
};
use crate::config::schema::{ProxyConfig, TimeoutConfig};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid upstream URL {url:?}: {reason}")]
    InvalidUpstream { url: String, reason: String },

    #[error("Timeout {0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("request_secs ({request_secs}) must be greater than upstream_secs ({upstream_secs})")]
    RequestTimeoutTooShort { request_secs: u64, upstream_secs: u64 },

    #[error("Invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let required = [
        (UPSTREAM_URL_ENV, &config.upstream.url),
        (HREF_PATTERN_ENV, &config.rewrite.pattern),
        (HREF_REPLACEMENT_ENV, &config.rewrite.replacement),
        (DEFAULT_SUFFIX_ENV, &config.rewrite.default_suffix),
    ];
    for (key, value) in required {
        if value.is_empty() {
            errors.push(ValidationError::Missing(key));
        }
    }

    if !config.upstream.url.is_empty() {
        if let Err(reason) = check_upstream(&config.upstream.url) {
            errors.push(ValidationError::InvalidUpstream {
                url: config.upstream.url.clone(),
                reason,
            });
        }
    }

    let timeouts = [
        ("upstream_connect_secs", config.timeouts.upstream_connect_secs),
        ("upstream_secs", config.timeouts.upstream_secs),
        ("request_secs", config.timeouts.request_secs),
    ];
    for (name, secs) in timeouts {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    let TimeoutConfig {
        upstream_secs,
        request_secs,
        ..
    } = config.timeouts;
    if upstream_secs > 0 && request_secs <= upstream_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs,
            upstream_secs,
        });
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {other:?}")),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("must not carry a query or fragment".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.upstream.url = "https://id.example.com".into();
        config.rewrite.pattern = "/users/".into();
        config.rewrite.replacement = "/people".into();
        config.rewrite.default_suffix = "prod".into();
        config
    }

    #[test]
    fn test_valid_config() {
        assert_eq!(validate_config(&valid()), Ok(()));
    }

    #[test]
    fn test_reports_every_missing_key() {
        let errors = validate_config(&ProxyConfig::default()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Missing("UPSTREAM_URL"),
                ValidationError::Missing("HREF_PATTERN"),
                ValidationError::Missing("HREF_REPLACEMENT"),
                ValidationError::Missing("DEFAULT_SUFFIX"),
            ]
        );
        assert_eq!(
            errors[0].to_string(),
            "Missing required environment variable: UPSTREAM_URL"
        );
    }

    #[test]
    fn test_single_missing_key() {
        let mut config = valid();
        config.rewrite.default_suffix.clear();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::Missing("DEFAULT_SUFFIX")])
        );
    }

    #[test]
    fn test_rejects_bad_upstream() {
        for bad in ["not a url", "ftp://files.example.com", "https://a.example.com?x=1"] {
            let mut config = valid();
            config.upstream.url = bad.into();
            let errors = validate_config(&config).unwrap_err();
            assert!(
                matches!(errors[0], ValidationError::InvalidUpstream { .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_request_timeout_must_exceed_upstream_timeout() {
        assert!(ProxyConfig::default().timeouts.request_secs > ProxyConfig::default().timeouts.upstream_secs);

        let mut config = valid();
        config.timeouts.upstream_secs = 30;
        config.timeouts.request_secs = 30;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::RequestTimeoutTooShort {
                request_secs: 30,
                upstream_secs: 30,
            }])
        );

        config.timeouts.request_secs = 31;
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_rejects_zero_timeout_and_bad_metrics_address() {
        let mut config = valid();
        config.timeouts.upstream_secs = 0;
        config.observability.metrics_address = Some("localhost".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroTimeout("upstream_secs"),
                ValidationError::InvalidMetricsAddress("localhost".into()),
            ]
        );
    }
}
