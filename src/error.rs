//! Error types for the forwarding path.
//!
//! Every failure that can happen while forwarding one request is a
//! [`ForwardError`]. Each variant maps to exactly one HTTP status so the
//! caller always receives a well-formed response instead of a dropped
//! connection.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Boxed error used for upstream failure causes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure while forwarding a single request.
#[derive(Error, Debug)]
pub enum ForwardError {
    /// The forwarded-URL header was not present on a request that reached the handler.
    #[error("No X-CF-Forwarded-Url header present")]
    MissingForwardedUrl,

    /// The forwarded-URL header could not be used as an absolute target.
    #[error("Invalid X-CF-Forwarded-Url header {value:?}: {reason}")]
    InvalidForwardedUrl { value: String, reason: String },

    /// The upstream could not be reached.
    #[error("Upstream unavailable: {url}: {source}")]
    UpstreamUnavailable {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The upstream did not produce a response head in time.
    #[error("Upstream timeout: {url}, timeout: {}ms", .timeout.as_millis())]
    UpstreamTimeout { url: String, timeout: Duration },

    /// The upstream connection failed after it was established.
    #[error("Upstream protocol error: {url}: {source}")]
    UpstreamProtocol {
        url: String,
        #[source]
        source: BoxError,
    },
}

impl ForwardError {
    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwardError::MissingForwardedUrl | ForwardError::InvalidForwardedUrl { .. } => {
                StatusCode::BAD_REQUEST
            }
            ForwardError::UpstreamUnavailable { .. } | ForwardError::UpstreamProtocol { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ForwardError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Whether the failure originated on the upstream leg.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ForwardError::UpstreamUnavailable { .. }
                | ForwardError::UpstreamTimeout { .. }
                | ForwardError::UpstreamProtocol { .. }
        )
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_upstream() {
            tracing::error!(status = %status, error = %self, "Forwarding failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Rejected forward request");
        }
        (status, self.to_string()).into_response()
    }
}
