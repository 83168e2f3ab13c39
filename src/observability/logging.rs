//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Render request/response heads for the forwarding log lines
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` takes precedence over the configured level
//! - Formatting is infallible; non-UTF-8 header values are shown lossily

use std::fmt::Write;

use axum::http::{HeaderMap, Method, StatusCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Install the global tracing subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "route_forwarder={level},tower_http={level}",
            level = config.log_level.to_ascii_lowercase()
        )
        .into()
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// `METHOD URI, [name:"v1", "v2", other:"v"]`
pub fn format_request(method: &Method, uri: &str, headers: &HeaderMap) -> String {
    format!("{} {}, {}", method, uri, format_headers(headers))
}

/// `STATUS, [name:"v1", ...]`
pub fn format_response(status: StatusCode, headers: &HeaderMap) -> String {
    format!("{}, {}", status, format_headers(headers))
}

/// Render a header map grouping repeated names, in insertion order.
pub fn format_headers(headers: &HeaderMap) -> String {
    let mut out = String::from("[");
    for (i, name) in headers.keys().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}:", name);
        for (j, value) in headers.get_all(name).iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "\"{}\"", String::from_utf8_lossy(value.as_bytes()));
        }
    }
    out.push(']');
    out
}
