//! Handler for the create endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::create::{CreateRequest, CreateResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Stores a URL and returns its short code.
///
/// # Endpoint
///
/// `POST /add`
///
/// # Request Body
///
/// ```json
/// { "Url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// { "code": "bf705e8", "url": "https://example.com/page", "short_url": "https://tiny.example/bf705e8" }
/// ```
///
/// `short_url` is present only when `BASE_URL` is configured. Posting the same
/// URL again returns the same code.
///
/// # Errors
///
/// - 400 if the body is not JSON or the URL is missing, relative or not ASCII
/// - 405 for methods other than POST (answered by the router)
/// - 409 if the code is taken by another URL and the reject policy is active
/// - 500 on store failure or when no free code is found
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<Json<CreateResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::malformed_input(
            "Malformed request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let mapping = state.mapping_service.create(&payload.url).await?;
    let short_url = state.short_url(&mapping.code);

    Ok(Json(CreateResponse {
        code: mapping.code.into_inner(),
        url: mapping.target,
        short_url,
    }))
}
