//! WebFinger href-rewriting reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                 WEBFINGER PROXY                  │
//!                         │                                                  │
//!   GET /.well-known/     │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   webfinger?resource=…  │  │  http   │───▶│ upstream │───▶│  decode    │   │
//!   ──────────────────────┼─▶│ server  │    │  client  │    │  as JSON?  │   │
//!                         │  └─────────┘    └────┬─────┘    └─────┬──────┘   │
//!                         │                      │ GET            │ yes      │
//!                         │                      ▼                ▼          │
//!                         │               Upstream IdP     ┌────────────┐    │
//!                         │                                │  rewrite   │    │
//!                         │                                │   hrefs    │    │
//!                         │                                └─────┬──────┘    │
//!   ◀─────────────────────┼──── rewritten JSON / raw pass-through◀┘          │
//!                         │                                                  │
//!                         │  config · lifecycle · observability              │
//!                         └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use webfinger_proxy::config::load_config;
use webfinger_proxy::lifecycle::startup;
use webfinger_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "webfinger-proxy")]
#[command(about = "Rewrites href links in an upstream WebFinger document", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override its values.
    #[arg(short, long, env = "WEBFINGER_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging();

    tracing::info!("webfinger-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.url,
        pattern = %config.rewrite.pattern,
        replacement = %config.rewrite.replacement,
        default_suffix = %config.rewrite.default_suffix,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
