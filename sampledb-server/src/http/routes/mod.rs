//! Route handlers organized by resource

pub mod company;
pub mod docs;
pub mod health;
pub mod listings;
pub mod say;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// 200 with an empty body, still labelled as JSON
pub(crate) fn empty_ok() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")]).into_response()
}
