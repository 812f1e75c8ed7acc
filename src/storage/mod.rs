//! Storage layer.
//!
//! Holds the lifecycle-scoped database handle. No route handler consults
//! it in the current behavior; the handle exists so the connection is
//! established and torn down with the process, and so the health endpoint
//! can report connectivity.

mod database;

pub use database::Database;
