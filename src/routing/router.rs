//! Route lookup.
//!
//! # Responsibilities
//! - Hold the route-service route (all three trigger headers present)
//! - Answer whether a request belongs to the forwarder or is a no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Explicit no-match rather than silent default

use axum::body::Body;
use axum::http::Request;

use crate::http::headers::{FORWARDED_URL, PROXY_METADATA, PROXY_SIGNATURE};
use crate::routing::matcher::{AndMatcher, HeaderPresentMatcher, Matcher};

/// Routing table of the forwarder: a single route selected by trigger headers.
#[derive(Debug)]
pub struct Router {
    route_service: AndMatcher,
}

impl Router {
    /// Route requests carrying every trigger header to the forwarder.
    pub fn route_service() -> Self {
        let matchers: Vec<Box<dyn Matcher>> = [FORWARDED_URL, PROXY_METADATA, PROXY_SIGNATURE]
            .into_iter()
            .map(|name| Box::new(HeaderPresentMatcher::new(name)) as Box<dyn Matcher>)
            .collect();

        Self {
            route_service: AndMatcher::new(matchers),
        }
    }

    /// Returns true if the request should be forwarded.
    pub fn match_request(&self, req: &Request<Body>) -> bool {
        self.route_service.matches(req)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::route_service()
    }
}
