//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (UPSTREAM_URL, HREF_PATTERN, ...)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the request handler
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup; a bad config stops the process
//!   before the port is bound
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError};
pub use schema::{
    ListenerConfig, ObservabilityConfig, ProxyConfig, RewriteConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::ValidationError;
