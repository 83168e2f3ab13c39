//! Route-service forwarder library.
//!
//! Receives requests that a gateway has tagged with `X-CF-Forwarded-Url`,
//! `X-CF-Proxy-Metadata` and `X-CF-Proxy-Signature`, reissues each one to
//! the forwarded URL and streams the upstream response back unchanged.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::ForwarderConfig;
pub use error::ForwardError;
pub use http::{ForwardHandler, HttpServer};
pub use lifecycle::{Drain, Shutdown};
pub use upstream::{HyperUpstreamClient, UpstreamClient};
