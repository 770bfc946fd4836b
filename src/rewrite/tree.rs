//! Recursive JSON tree walk.
//!
//! Visits every object and array in a decoded document and hands string
//! values stored under the `href` key to the [`HrefRewriter`]. Recursion
//! depth equals document depth; serde_json refuses to decode documents
//! nested deeper than 128 levels, which bounds it in practice.

use std::borrow::Cow;

use serde_json::Value;

use super::href::HrefRewriter;

const HREF_KEY: &str = "href";

/// Summary of a rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Number of `href` values whose content changed.
    pub rewritten: usize,
}

/// Rewrite every matching `href` in `value` in place and return the same value.
pub fn rewrite<'a>(value: &'a mut Value, rewriter: &HrefRewriter, suffix: &str) -> &'a mut Value {
    visit(value, rewriter, suffix, &mut RewriteOutcome::default());
    value
}

/// Like [`rewrite`], but reports how many hrefs were changed.
pub fn rewrite_hrefs(value: &mut Value, rewriter: &HrefRewriter, suffix: &str) -> RewriteOutcome {
    let mut outcome = RewriteOutcome::default();
    visit(value, rewriter, suffix, &mut outcome);
    outcome
}

fn visit(value: &mut Value, rewriter: &HrefRewriter, suffix: &str, outcome: &mut RewriteOutcome) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                // An href is either rewritten or left alone, never descended into.
                if key == HREF_KEY {
                    rewrite_href(child, rewriter, suffix, outcome);
                } else {
                    visit(child, rewriter, suffix, outcome);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                visit(item, rewriter, suffix, outcome);
            }
        }
        _ => {}
    }
}

fn rewrite_href(value: &mut Value, rewriter: &HrefRewriter, suffix: &str, outcome: &mut RewriteOutcome) {
    let Value::String(href) = value else {
        return;
    };
    if !rewriter.applies_to(href) {
        return;
    }

    let rewritten = match rewriter.rewrite_str(href, suffix) {
        Cow::Owned(new) => new,
        Cow::Borrowed(_) => return,
    };
    if rewritten != *href {
        *href = rewritten;
        outcome.rewritten += 1;
    }
}
