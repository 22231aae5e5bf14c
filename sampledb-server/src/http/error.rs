//! API error types with IntoResponse
//!
//! Each variant fixes its status code; handlers choose the variant, which
//! is how the same storage failure becomes 400 on create and 500 elsewhere.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationErrors;
use crate::upstream::UpstreamError;

/// Fixed body for mutations whose key matched no row
pub const INVALID_COMPANY_ID: &str = "Invalid company Id supplied";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Required fields missing or blank (400)
    Validation(ValidationErrors),

    /// Body or path could not be read (400)
    BadRequest { message: String },

    /// Mutation affected zero rows (400)
    InvalidCompanyId,

    /// Listing failed (500)
    ReadFailed(DbError),

    /// Insert failed, e.g. duplicate key (400)
    CreateFailed(DbError),

    /// Update or delete failed (500)
    WriteFailed(DbError),

    /// Remote function unreachable or unhappy (500, plain text)
    Upstream(UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::BadRequest { .. }
            | Self::InvalidCompanyId
            | Self::CreateFailed(_) => StatusCode::BAD_REQUEST,
            Self::ReadFailed(_) | Self::WriteFailed(_) | Self::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(errors) => json!(errors),
            Self::BadRequest { message } => json!({ "error": message }),
            Self::InvalidCompanyId => json!({ "error": INVALID_COMPANY_ID }),
            Self::ReadFailed(e) | Self::WriteFailed(e) => {
                tracing::error!("Database error: {}", e);
                json!({ "error": e.to_string() })
            }
            Self::CreateFailed(e) => {
                tracing::warn!("Insert rejected: {}", e);
                json!({ "error": e.to_string() })
            }
            Self::Upstream(e) => {
                tracing::error!("Upstream error: {}", e);
                return (
                    status,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    e.to_string(),
                )
                    .into_response();
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<UpstreamError> for ApiError {
    fn from(e: UpstreamError) -> Self {
        Self::Upstream(e)
    }
}
