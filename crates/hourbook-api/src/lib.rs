//! # hourbook-api
//!
//! HTTP API layer for Hourbook built on Axum.
//!
//! Provides the REST endpoints, middleware (request logging, CORS),
//! extractors, DTOs, and the mapping from [`hourbook_core::AppError`] to
//! HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
