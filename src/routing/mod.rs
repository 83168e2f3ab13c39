//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (headers)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate trigger header presence)
//!     → Return: forward, or no-match (404 before the handler runs)
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - Deterministic: same headers always give the same decision

pub mod matcher;
pub mod router;

pub use router::Router;
