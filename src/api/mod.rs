//! # Trivia API
//!
//! JSON-over-HTTP surface: request bodies, success envelopes, the error
//! taxonomy, and the `/api` router.

pub mod errors;
pub mod request;
pub mod response;
pub mod routes;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use request::{ApiJson, IdPath};
pub use routes::api_routes;
