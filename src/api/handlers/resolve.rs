//! Handler for short code redirects.

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};

use crate::domain::repositories::StoreError;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::path::extract_code;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`, mounted as the router fallback so that every path the named
/// routes do not claim lands here and goes through [`extract_code`].
///
/// # Request Flow
///
/// 1. Reject methods other than GET with 405
/// 2. Parse the path; anything but one non-empty segment is a 404 without a store call
/// 3. Look the code up
/// 4. Return 303 See Other with `Location: <target>`
///
/// # Errors
///
/// - 404 for malformed paths and unknown codes
/// - 500 on store failure; the failure stays confined to this request
pub async fn resolve_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed { allow: "GET" });
    }

    let code = extract_code(uri.path()).ok_or_else(|| AppError::MalformedCode {
        path: uri.path().to_string(),
    })?;

    let target = state.mapping_service.resolve(&code).await?;

    let location = HeaderValue::from_str(&target).map_err(|_| {
        StoreError::ReadFailed(format!("stored target for {code} is not a valid Location"))
    })?;

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}
