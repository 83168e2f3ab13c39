//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trigger-header routing)
//!     → forward.rs (ForwardHandler)
//!         → headers.rs (forwarded URL, header rewrite)
//!         → upstream client
//!     → upstream response relayed to client
//! ```

pub mod forward;
pub mod headers;
pub mod server;

pub use forward::ForwardHandler;
pub use headers::{FORWARDED_URL, PROXY_METADATA, PROXY_SIGNATURE};
pub use server::HttpServer;
