//! Request-boundary error type.
//!
//! Every failure a handler can hit ends up as an [`AppError`], which renders
//! as a JSON envelope:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": { ... } } }
//! ```

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body missing, not JSON, or without a usable URL.
    #[error("{message}")]
    MalformedInput { message: String, details: Value },

    /// Resolve path is not exactly one non-empty segment.
    #[error("malformed short code path '{path}'")]
    MalformedCode { path: String },

    /// Code candidate is bound to a different URL and the reject policy is active.
    #[error("code {code} is already bound to a different URL")]
    Collision { code: String },

    /// Every candidate code for the URL is bound to a different URL.
    #[error("no free code for URL after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("method not allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn malformed_input(message: impl Into<String>, details: Value) -> Self {
        Self::MalformedInput {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedInput { .. } => StatusCode::BAD_REQUEST,
            Self::MalformedCode { .. } => StatusCode::NOT_FOUND,
            Self::Collision { .. } => StatusCode::CONFLICT,
            Self::CodeSpaceExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts into the serializable error payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            Self::MalformedInput { details, .. } => ("malformed_input", details.clone()),
            Self::MalformedCode { path } => ("malformed_code", json!({ "path": path })),
            Self::Collision { code } => ("collision", json!({ "code": code })),
            Self::CodeSpaceExhausted { attempts } => {
                ("code_space_exhausted", json!({ "attempts": attempts }))
            }
            Self::MethodNotAllowed { allow } => ("method_not_allowed", json!({ "allow": allow })),
            Self::Store(StoreError::NotFound { code }) => ("not_found", json!({ "code": code })),
            Self::Store(StoreError::Unavailable(_)) => ("store_unavailable", json!({})),
            Self::Store(StoreError::WriteFailed(_)) => ("store_write_failed", json!({})),
            Self::Store(StoreError::ReadFailed(_)) => ("store_read_failed", json!({})),
        };

        // Store internals stay in the logs, clients get a generic message.
        let message = match self {
            Self::Store(StoreError::NotFound { .. }) => "Short link not found".to_string(),
            Self::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::malformed_input(
            "Request validation failed",
            json!({ "reason": errors.to_string() }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = Json(ErrorBody {
            error: self.to_error_info(),
        });

        match self {
            Self::MethodNotAllowed { allow } => {
                (status, [(header::ALLOW, allow)], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
