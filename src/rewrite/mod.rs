//! JSON href rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! upstream body (bytes)
//!     → serde_json::Value (decoded once per request)
//!     → tree.rs (walk objects/arrays, find "href" strings)
//!     → href.rs (pattern + one path segment + "/" → replacement + suffix + "/")
//!     → same Value, mutated in place
//! ```
//!
//! # Design Decisions
//! - Shape of the document is never changed, only `href` string values
//! - Substring containment is checked before the regex runs
//! - The matcher is compiled once per pattern and shared by all requests

pub mod href;
pub mod tree;

pub use href::HrefRewriter;
pub use tree::{rewrite, rewrite_hrefs, RewriteOutcome};
