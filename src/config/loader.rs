//! Configuration loading from an optional TOML file and the environment.
//!
//! Environment values win over file values. Empty environment values are
//! treated as unset.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const UPSTREAM_URL_ENV: &str = "UPSTREAM_URL";
pub const HREF_PATTERN_ENV: &str = "HREF_PATTERN";
pub const HREF_REPLACEMENT_ENV: &str = "HREF_REPLACEMENT";
pub const DEFAULT_SUFFIX_ENV: &str = "DEFAULT_SUFFIX";
pub const PORT_ENV: &str = "PORT";
pub const UPSTREAM_CONNECT_TIMEOUT_ENV: &str = "UPSTREAM_CONNECT_TIMEOUT_SECS";
pub const UPSTREAM_TIMEOUT_ENV: &str = "UPSTREAM_TIMEOUT_SECS";
pub const REQUEST_TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_SECS";
pub const METRICS_ADDRESS_ENV: &str = "METRICS_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value {value:?} for {key}: expected a number")]
    InvalidNumber { key: &'static str, value: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from the process environment, on top of
/// the TOML file at `path` when one is given.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading variables through `lookup`.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => ProxyConfig::default(),
    };

    apply_env(&mut config, |key| lookup(key).filter(|v| !v.is_empty()))?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn read_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env<F>(config: &mut ProxyConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(UPSTREAM_URL_ENV) {
        config.upstream.url = v;
    }
    if let Some(v) = lookup(HREF_PATTERN_ENV) {
        config.rewrite.pattern = v;
    }
    if let Some(v) = lookup(HREF_REPLACEMENT_ENV) {
        config.rewrite.replacement = v;
    }
    if let Some(v) = lookup(DEFAULT_SUFFIX_ENV) {
        config.rewrite.default_suffix = v;
    }
    if let Some(v) = lookup(METRICS_ADDRESS_ENV) {
        config.observability.metrics_address = Some(v);
    }

    if let Some(port) = parse_number(&lookup, PORT_ENV)? {
        config.listener.port = port;
    }
    if let Some(secs) = parse_number(&lookup, UPSTREAM_CONNECT_TIMEOUT_ENV)? {
        config.timeouts.upstream_connect_secs = secs;
    }
    if let Some(secs) = parse_number(&lookup, UPSTREAM_TIMEOUT_ENV)? {
        config.timeouts.upstream_secs = secs;
    }
    if let Some(secs) = parse_number(&lookup, REQUEST_TIMEOUT_ENV)? {
        config.timeouts.request_secs = secs;
    }

    Ok(())
}

fn parse_number<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(None),
    }
}
