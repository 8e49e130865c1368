//! # stockroom-api
//!
//! HTTP API layer for Stockroom built on Axum.
//!
//! Provides the credential endpoints, the access gate middleware that
//! enforces the public/protected route table, extractors, DTOs, and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
