//! Upstream connectivity.
//!
//! The forwarder only needs one thing from the network: send a request and
//! get back a streaming response. [`UpstreamClient`] is that seam;
//! [`HyperUpstreamClient`] is the pooled default.

pub mod client;

pub use client::{HyperUpstreamClient, UpstreamClient};
