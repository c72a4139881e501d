//! Named API routes.

use crate::api::handlers::{create_handler, health_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes with fixed paths.
///
/// # Endpoints
///
/// - `POST /add`    - Store a URL, return its code
/// - `GET  /health` - Store connectivity check
///
/// `add` is shorter than any code and `health` is not hex, so neither
/// shadows a code.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(create_handler))
        .route("/health", get(health_handler))
}
