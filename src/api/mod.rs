//! HTTP API layer for the DA Admin backend.
//!
//! Provides the mock REST endpoints for users, auth, and dashboard data.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
