//! Middleware components for HTTP request processing.
//!
//! Cross-cutting concerns are applied as layers around the router instead of
//! inside handlers: per-client rate limiting and request logging.

pub mod ip;
pub mod logging;
pub mod rate_limit;

pub use rate_limit::RateLimiter;
