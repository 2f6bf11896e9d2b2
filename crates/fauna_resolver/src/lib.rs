//! Animal image resolution with cache, retry and static fallback.
//!
//! [`Resolver::resolve`] degrades through three tiers:
//! 1. a short-lived per-category cache
//! 2. a live API fetch, gated and retried
//! 3. a uniformly random pick from the category's static pool
//!
//! It never fails; the worst case is the default image URL.
//!
//! HTTP sits behind the [`ImageTransport`] trait so the resolution logic can
//! be driven by scripted transports in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod http;
mod resolver;
mod transport;

pub use http::ReqwestTransport;
pub use resolver::Resolver;
pub use transport::{FetchRequest, ImageTransport, TransportResponse};
