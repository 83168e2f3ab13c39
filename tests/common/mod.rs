//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, Response, Uri};
use axum::Router;
use tokio::net::TcpListener;

use route_forwarder::{ForwarderConfig, HttpServer, Shutdown};

pub const PROXY_METADATA_VALUE: &str = "test-proxy-metadata";
pub const PROXY_SIGNATURE_VALUE: &str = "test-proxy-signature";

/// A request as seen by the mock upstream.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// A running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    /// `http://127.0.0.1:<port><path>`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Host header the forwarder's client is expected to send.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Assert exactly one request was received and return it.
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream request");
        requests.into_iter().next().unwrap()
    }
}

/// Start a mock upstream that records every request body in full and
/// answers with `respond`.
pub async fn start_upstream<F>(respond: F) -> MockUpstream
where
    F: Fn(&RecordedRequest) -> Response<Body> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let recorded = requests.clone();
    let app = Router::new().fallback(move |request: Request<Body>| {
        let recorded = recorded.clone();
        let respond = respond.clone();
        async move {
            let (parts, body) = request.into_parts();
            let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
            let request = RecordedRequest {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
            };
            let response = (*respond)(&request);
            recorded.lock().unwrap().push(request);
            response
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, requests }
}

/// Start a mock upstream that answers every request with a raw response.
///
/// Used where the response must be streamed or delayed in ways a
/// recording upstream can't express.
#[allow(dead_code)]
pub async fn start_raw_upstream<F, Fut>(respond: F) -> SocketAddr
where
    F: Fn(Request<Body>) -> Fut + Clone + Send + Sync + 'static,
    Fut: std::future::Future<Output = Response<Body>> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(move |request: Request<Body>| respond(request));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}

/// A running forwarder.
pub struct Proxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl Proxy {
    /// `http://127.0.0.1:<port><path>`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Proxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the forwarder on an ephemeral port.
pub async fn start_proxy() -> Proxy {
    let mut config = ForwarderConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.client.response_timeout_secs = 5;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let drain = shutdown.drain();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, drain).await;
    });

    Proxy { addr, shutdown }
}

/// Caller that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Attach the three trigger headers.
pub fn with_trigger_headers(request: reqwest::RequestBuilder, forwarded_url: &str) -> reqwest::RequestBuilder {
    request
        .header("X-CF-Forwarded-Url", forwarded_url)
        .header("X-CF-Proxy-Metadata", PROXY_METADATA_VALUE)
        .header("X-CF-Proxy-Signature", PROXY_SIGNATURE_VALUE)
}
