//! Single `href` string rewriting.

use std::borrow::Cow;

use regex::{NoExpand, Regex};

/// Compiled href matcher for one literal pattern.
///
/// Matches the pattern immediately followed by a single path segment and a
/// trailing slash, e.g. `/users/alice123/` for the pattern `/users/`.
#[derive(Debug, Clone)]
pub struct HrefRewriter {
    pattern: String,
    replacement: String,
    matcher: Regex,
}

impl HrefRewriter {
    /// Compile a rewriter for the given literal pattern.
    ///
    /// The pattern is escaped, so regex metacharacters in it match literally.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        let matcher = Regex::new(&format!("{}[^/]+/", regex::escape(&pattern)))?;

        Ok(Self {
            pattern,
            replacement: replacement.into(),
            matcher,
        })
    }

    /// Cheap pre-filter: does the value contain the literal pattern at all?
    pub fn applies_to(&self, href: &str) -> bool {
        href.contains(&self.pattern)
    }

    /// Replace every `pattern + segment + "/"` in `href` with
    /// `replacement + suffix + "/"`.
    ///
    /// Returns `Cow::Borrowed` when nothing matched.
    pub fn rewrite_str<'a>(&self, href: &'a str, suffix: &str) -> Cow<'a, str> {
        let target = format!("{}{}/", self.replacement, suffix);
        self.matcher.replace_all(href, NoExpand(&target))
    }
}
