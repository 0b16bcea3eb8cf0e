//! # Itemstore
//!
//! A small HTTP CRUD service for a single `Item` resource, persisted in SQLite.
//!
//! ## Architecture
//!
//! - **Axum** for routing, extractors and middleware
//! - **SQLx** for asynchronous SQLite access through a shared pool
//! - **Tokio** as the async runtime
//! - **Serde** for the JSON request/response shapes
//!
//! ## Core Components
//!
//! - [`store`]: the `items` table behind a request-scoped connection handle
//! - [`operations`]: create/find/read/update/delete with typed not-found errors
//! - [`routes`]: HTTP handlers and router assembly
//! - [`error`]: the single mapping from errors to HTTP responses
//! - [`middleware`]: per-client rate limiting and request logging
//! - [`config`]: layered configuration (defaults, file, environment)
//! - [`db`]: pool creation and schema initialization
//! - [`state`]: shared application state
//! - [`metrics`]: request counters
//! - [`types`]: external JSON representations

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod middleware;
pub mod operations;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
