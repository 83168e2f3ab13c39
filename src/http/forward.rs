//! The route-service forwarding handler.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → extract X-CF-Forwarded-Url
//!     → strip X-CF-Forwarded-Url + Host
//!     → same method, forwarded URL, inbound body stream → UpstreamClient
//!     → upstream status + headers + body stream → caller
//! ```
//!
//! # Design Decisions
//! - Bodies are moved, never collected; hyper applies backpressure on both legs
//! - Nothing on the response path is filtered or translated
//! - Dropping the returned response drops the upstream body and its connection

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};

use crate::error::ForwardError;
use crate::http::headers::{extract_forwarded_url, forwarded_headers};
use crate::observability::logging::{format_request, format_response};
use crate::upstream::UpstreamClient;

/// Forwards one request to the URL named in its `X-CF-Forwarded-Url` header.
#[derive(Clone)]
pub struct ForwardHandler {
    client: Arc<dyn UpstreamClient>,
}

impl ForwardHandler {
    pub fn new(client: Arc<dyn UpstreamClient>) -> Self {
        Self { client }
    }

    /// Forward `request` and relay the upstream response.
    pub async fn handle(&self, request: Request<Body>) -> Result<Response<Body>, ForwardError> {
        let (parts, body) = request.into_parts();

        tracing::info!(
            "Incoming Request:  {}",
            format_request(&parts.method, &parts.uri.to_string(), &parts.headers)
        );

        let forwarded_url = extract_forwarded_url(&parts.headers)?;
        let headers = forwarded_headers(&parts.headers);

        tracing::info!(
            "Outgoing Request:  {}",
            format_request(&parts.method, &forwarded_url.to_string(), &headers)
        );

        let mut outbound = Request::new(body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = forwarded_url;
        *outbound.headers_mut() = headers;

        let response = self.client.send(outbound).await?;

        tracing::info!(
            "Outgoing Response: {}",
            format_response(response.status(), response.headers())
        );

        Ok(response)
    }
}
