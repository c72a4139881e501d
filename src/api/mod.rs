//! HTTP layer.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - Create, resolve and health handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Named routes (the resolver is mounted as fallback in [`crate::routes`])

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
