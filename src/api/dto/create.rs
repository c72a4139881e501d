//! DTOs for the create endpoint.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Request to shorten a URL.
///
/// The field is named `Url` on the wire; `url` is accepted as well.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequest {
    #[serde(rename = "Url", alias = "url")]
    #[validate(url(message = "Url must be an absolute URL"))]
    #[validate(custom(function = "validate_scheme"))]
    #[validate(custom(function = "validate_location"))]
    pub url: String,
}

/// Only web targets can be redirected to.
fn validate_scheme(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("scheme")
            .with_message(Cow::Borrowed("Url must use http or https"))),
    }
}

/// Rejects URLs that could not be sent back in a `Location` header.
fn validate_location(url: &str) -> Result<(), ValidationError> {
    if HeaderValue::from_str(url).is_err() {
        return Err(ValidationError::new("location").with_message(Cow::Borrowed(
            "Url must consist of printable ASCII characters",
        )));
    }
    Ok(())
}

/// Successful create response.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub code: String,
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
}
