//! Middleware components for the API router.

pub mod rate_limit;
pub mod request_id;

// Re-export commonly used types
pub use rate_limit::{rate_limit_middleware, RateLimiter};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
