//! Response construction.
//!
//! # Responsibilities
//! - Copy upstream headers to the client response (first value per name)
//! - Strip hop-by-hop headers; the server framing layer owns them
//! - Build the pass-through response for bodies that are not JSON
//! - Build the rewritten JSON response with its fixed header set
//!
//! # Design Decisions
//! - Multi-valued upstream headers collapse to their first value
//! - `Content-Length` is dropped for rewritten bodies and recomputed

use axum::{
    body::{Body, Bytes},
    http::{
        header::{self, HeaderName},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::Response,
};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name) || name.as_str() == "keep-alive"
}

/// Copy the first value of every upstream header into `dst`, skipping
/// hop-by-hop headers and any name in `skip`.
pub fn copy_headers(src: &HeaderMap, dst: &mut HeaderMap, skip: &[HeaderName]) {
    for name in src.keys() {
        if is_hop_by_hop(name) || skip.contains(name) {
            continue;
        }
        if let Some(value) = src.get(name) {
            dst.insert(name.clone(), value.clone());
        }
    }
}

/// Forward the upstream status, headers and raw body unchanged.
pub fn passthrough(status: StatusCode, headers: &HeaderMap, body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    copy_headers(headers, response.headers_mut(), &[]);
    response
}

/// Forward the upstream status and headers with a rewritten JSON body.
pub fn rewritten(status: StatusCode, headers: &HeaderMap, body: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;

    let out = response.headers_mut();
    copy_headers(headers, out, &[header::CONTENT_LENGTH]);
    out.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    out.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    out.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    out.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    response
}
