//! Request matching logic.
//!
//! # Responsibilities
//! - Match on presence of a header (case-insensitive name)
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Header names are case-insensitive (RFC 9110)
//! - Presence only; values are never inspected here
//! - Empty AND = always matches (wildcard)

use axum::body::Body;
use axum::http::header::HeaderName;
use axum::http::Request;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches when a header is present, whatever its value.
#[derive(Debug, Clone)]
pub struct HeaderPresentMatcher {
    name: HeaderName,
}

impl HeaderPresentMatcher {
    /// Create a new header presence matcher.
    pub fn new(name: HeaderName) -> Self {
        Self { name }
    }
}

impl Matcher for HeaderPresentMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        req.headers().contains_key(&self.name)
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matchers.iter().all(|m| m.matches(req))
    }
}
