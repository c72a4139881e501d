//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /add`    - Create a mapping
//! - `GET  /health` - Health check
//! - everything else - Resolve `/{code}` (fallback)
//!
//! Paths are not normalized: `/abc1234/` is a malformed code, not an alias.

use crate::api;
use crate::api::handlers::resolve_handler;
use crate::api::middleware;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::routes())
        .fallback(resolve_handler)
        .with_state(state)
        .layer(middleware::tracing::layer())
}
