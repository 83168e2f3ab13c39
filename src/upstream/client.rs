//! Outbound HTTP client.
//!
//! # Responsibilities
//! - Issue the forwarded request over a pooled connection
//! - Set Host from the target authority
//! - Originate TLS for `https` targets
//! - Bound connect time and time-to-response-head
//! - Classify failures for the caller
//!
//! # Design Decisions
//! - Bodies are passed through as streams in both directions
//! - No retries: the forwarded body can only be read once
//! - The response body is not covered by the timeout; long streams are fine
//! - Trust anchors come from the platform store; without one, `https` targets
//!   fail at handshake while `http` targets keep working

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use hyper_rustls::{ConfigBuilderExt, HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::{TokioExecutor, TokioTimer};
use rustls::RootCertStore;

use crate::config::ClientConfig;
use crate::error::ForwardError;

/// Capability to send a request to an upstream and get its response head.
///
/// Implementations own pooling, TLS and timeouts. The returned body streams
/// from the upstream connection; dropping it aborts that connection.
pub trait UpstreamClient: Send + Sync + 'static {
    fn send(&self, request: Request<Body>) -> BoxFuture<'static, Result<Response<Body>, ForwardError>>;
}

/// Pooled HTTP/HTTPS client built on hyper-util and rustls.
#[derive(Clone)]
pub struct HyperUpstreamClient {
    inner: Client<HttpsConnector<HttpConnector>, Body>,
    response_timeout: Duration,
}

impl HyperUpstreamClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));
        http.set_nodelay(true);

        let connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config())
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);

        let inner = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build(connector);

        Self {
            inner,
            response_timeout: Duration::from_secs(config.response_timeout_secs),
        }
    }
}

fn tls_config() -> rustls::ClientConfig {
    match rustls::ClientConfig::builder().with_native_roots() {
        Ok(builder) => builder.with_no_client_auth(),
        Err(e) => {
            tracing::warn!(error = %e, "No native root certificates, https upstreams will fail");
            rustls::ClientConfig::builder()
                .with_root_certificates(RootCertStore::empty())
                .with_no_client_auth()
        }
    }
}

impl UpstreamClient for HyperUpstreamClient {
    fn send(&self, request: Request<Body>) -> BoxFuture<'static, Result<Response<Body>, ForwardError>> {
        let url = request.uri().to_string();
        let timeout = self.response_timeout;
        let pending = self.inner.request(request);

        Box::pin(async move {
            match tokio::time::timeout(timeout, pending).await {
                Ok(Ok(response)) => Ok(response.map(Body::new)),
                Ok(Err(e)) if e.is_connect() => Err(ForwardError::UpstreamUnavailable {
                    url,
                    source: Box::new(e),
                }),
                Ok(Err(e)) => Err(ForwardError::UpstreamProtocol {
                    url,
                    source: Box::new(e),
                }),
                Err(_) => Err(ForwardError::UpstreamTimeout { url, timeout }),
            }
        })
    }
}
