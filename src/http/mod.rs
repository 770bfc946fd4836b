//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → request.rs (suffix header, path and query)
//!     → upstream.rs (GET upstream base + path and query)
//!     → rewrite (JSON bodies only)
//!     → response.rs (copy headers, pass-through or rewritten body)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use error::{ProxyError, ServerError};
pub use request::{X_ISSUER_SUFFIX, X_REQUEST_ID};
pub use server::{AppState, HttpServer, WEBFINGER_PATH};
pub use upstream::{UpstreamClient, UpstreamResponse};
