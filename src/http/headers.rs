//! Route-service headers and the inbound → outbound header rewrite.
//!
//! # Responsibilities
//! - Name the trigger headers set by the gateway
//! - Extract the forwarded URL
//! - Strip the forwarded-URL and Host headers before dispatch
//!
//! # Design Decisions
//! - Metadata and signature headers are opaque and pass through untouched
//! - Host is never synthesized here; the outbound client derives it from the URL
//! - The forwarded URL is used exactly as sent: no path normalization, no
//!   percent-decoding
//! - `HeaderMap` keeps per-name value order and multiplicity, so repeated
//!   headers survive the rewrite

use axum::http::header::{HeaderName, HOST};
use axum::http::uri::InvalidUri;
use axum::http::{HeaderMap, Uri};

use crate::error::ForwardError;

/// Absolute URL the request must be forwarded to.
pub const FORWARDED_URL: HeaderName = HeaderName::from_static("x-cf-forwarded-url");

/// Opaque gateway metadata.
pub const PROXY_METADATA: HeaderName = HeaderName::from_static("x-cf-proxy-metadata");

/// Opaque signature over the metadata.
pub const PROXY_SIGNATURE: HeaderName = HeaderName::from_static("x-cf-proxy-signature");

/// Read the first forwarded-URL value and parse it as an absolute URI.
///
/// Only `http` and `https` targets with an authority are accepted.
pub fn extract_forwarded_url(headers: &HeaderMap) -> Result<Uri, ForwardError> {
    let value = headers
        .get(FORWARDED_URL)
        .ok_or(ForwardError::MissingForwardedUrl)?;

    let raw = value.to_str().map_err(|_| ForwardError::InvalidForwardedUrl {
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        reason: "not valid UTF-8".to_string(),
    })?;

    let invalid = |reason: &str| ForwardError::InvalidForwardedUrl {
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let uri: Uri = raw
        .parse()
        .map_err(|e: InvalidUri| invalid(&e.to_string()))?;

    match uri.scheme_str() {
        Some(scheme)
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") => {}
        Some(scheme) => return Err(invalid(&format!("unsupported scheme {scheme:?}"))),
        None => return Err(invalid("not an absolute URL")),
    }
    if uri.host().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }

    Ok(uri)
}

/// Copy every header except the forwarded URL and Host.
pub fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if *name == FORWARDED_URL || *name == HOST {
            continue;
        }
        forwarded.append(name.clone(), value.clone());
    }
    forwarded
}
