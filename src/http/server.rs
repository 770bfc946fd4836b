//! HTTP server setup and the webfinger handler.
//!
//! # Responsibilities
//! - Create the Axum Router with the single webfinger route
//! - Wire up middleware (request ID, tracing, timeout)
//! - Fetch the upstream document and rewrite its hrefs
//! - Fall back to pass-through when the upstream body is not JSON

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::error::{ProxyError, ServerError};
use crate::http::request::{self, UuidRequestId};
use crate::http::response;
use crate::http::upstream::UpstreamClient;
use crate::observability::metrics;
use crate::rewrite::{rewrite_hrefs, HrefRewriter};

pub const WEBFINGER_PATH: &str = "/.well-known/webfinger";

/// Application state injected into handlers. Read-only after startup.
#[derive(Debug)]
pub struct AppState {
    pub config: ProxyConfig,
    pub rewriter: HrefRewriter,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let rewriter = HrefRewriter::new(&config.rewrite.pattern, &config.rewrite.replacement)?;
        let upstream = UpstreamClient::new(&config.upstream, &config.timeouts)?;

        Ok(Self {
            config,
            rewriter,
            upstream,
        })
    }
}

/// HTTP server for the webfinger proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let state = Arc::new(AppState::new(config)?);

        Ok(Self {
            router: Self::build_router(state, request_timeout),
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
        Router::new()
            .route(WEBFINGER_PATH, any(webfinger_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request::request_id(req.headers())
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The router, for serving on a custom listener or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fetch the upstream document for this path and query and rewrite its hrefs.
async fn webfinger_handler(State(state): State<Arc<AppState>>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (parts, _body) = request.into_parts();
    let suffix = request::resolve_suffix(&parts.headers, &state.config.rewrite.default_suffix);
    let path_and_query = request::path_and_query(&parts.uri);

    tracing::info!(
        request_id = %request::request_id(&parts.headers),
        target = %state.upstream.target(path_and_query),
        suffix = %suffix,
        "Fetching upstream document"
    );

    let response = match proxy(&state, path_and_query, suffix).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                request_id = %request::request_id(&parts.headers),
                status = %e.status(),
                error = %e,
                "Upstream request failed"
            );
            e.into_response()
        }
    };

    metrics::record_request(&parts.method, response.status().as_u16(), start);
    response
}

async fn proxy(state: &AppState, path_and_query: &str, suffix: &str) -> Result<Response, ProxyError> {
    let upstream = state.upstream.fetch(path_and_query).await?;

    let mut document: Value = match serde_json::from_slice(&upstream.body) {
        Ok(document) => document,
        Err(e) => {
            tracing::debug!(status = %upstream.status, error = %e, "Upstream body is not JSON, passing through");
            metrics::record_passthrough();
            return Ok(response::passthrough(upstream.status, &upstream.headers, upstream.body));
        }
    };

    let outcome = rewrite_hrefs(&mut document, &state.rewriter, suffix);
    tracing::debug!(rewritten = outcome.rewritten, "Rewrote hrefs");
    metrics::record_hrefs_rewritten(outcome.rewritten);

    let body = serde_json::to_vec_pretty(&document).map_err(ProxyError::Encode)?;
    Ok(response::rewritten(upstream.status, &upstream.headers, body))
}
