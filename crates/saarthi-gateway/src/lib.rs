//! # Saarthi Gateway
//!
//! HTTP API over the guidance engine: a health check, a retrieval
//! preview, and the guidance endpoint itself. One axum router, CORS open
//! for browser callers, request tracing on every route.

mod page;
pub mod routes;
pub mod server;

pub use server::{AppState, run_server};
