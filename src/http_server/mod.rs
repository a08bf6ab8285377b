//! # Trivia HTTP Server Module
//!
//! Axum server exposing the trivia API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/categories`, `/api/categories/{id}/questions`
//! - `/api/questions`, `/api/questions/{id}`
//! - `/api/search`, `/api/quizzes`

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::{build_router, HttpServer};
