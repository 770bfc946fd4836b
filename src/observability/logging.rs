//! Structured logging.
//!
//! `RUST_LOG` takes precedence; otherwise the crate logs at info and the
//! tower-http request spans at info.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "webfinger_proxy=info,tower_http=info";

/// Install the global tracing subscriber. Call once, first thing in `main`.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
