//! Company endpoints - the only writable resource
//!
//! Each handler validates every input first and returns 400 without
//! touching storage if any is rejected. Updates and deletes learn whether
//! the id exists from the statement's affected-row count.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Response,
    routing::{patch, post},
    Router,
};

use super::empty_ok;
use crate::db::MutationOutcome;
use crate::http::error::ApiError;
use crate::http::extractors::{CompanyId, Fields};
use crate::http::server::AppState;
use crate::models::{Location, NewCompany, Validator};

/// Zero matched rows means the id was wrong
fn applied(outcome: MutationOutcome) -> Result<Response, ApiError> {
    match outcome {
        MutationOutcome::Applied { .. } => Ok(empty_ok()),
        MutationOutcome::NoMatch => Err(ApiError::InvalidCompanyId),
    }
}

/// POST /company - insert a new company
async fn create_company(
    State(state): State<Arc<AppState>>,
    body: Fields,
) -> Result<Response, ApiError> {
    let mut v = Validator::new();
    let company = NewCompany {
        id: v.required_value(Location::Body, "COMPANY_ID", body.get("COMPANY_ID")),
        name: v.required_value(Location::Body, "COMPANY_NAME", body.get("COMPANY_NAME")),
        city: v.required_value(Location::Body, "COMPANY_CITY", body.get("COMPANY_CITY")),
    };
    v.finish()?;

    // Storage failures on insert are the client's problem (duplicate id, bad length)
    state
        .directory
        .create_company(&company)
        .await
        .map_err(ApiError::CreateFailed)?;

    tracing::info!(company_id = %company.id, "company created");
    Ok(empty_ok())
}

/// PATCH /company/{COMPANY_ID} - change the name only
async fn patch_company(
    State(state): State<Arc<AppState>>,
    CompanyId(raw_id): CompanyId,
    body: Fields,
) -> Result<Response, ApiError> {
    let mut v = Validator::new();
    let id = v.required(Location::Params, "COMPANY_ID", Some(raw_id.as_str()));
    let name = v.required_value(Location::Body, "COMPANY_NAME", body.get("COMPANY_NAME"));
    v.finish()?;

    let outcome = state
        .directory
        .rename_company(&id, &name)
        .await
        .map_err(ApiError::WriteFailed)?;
    applied(outcome)
}

/// PUT /company/{COMPANY_ID} - replace name and city
async fn put_company(
    State(state): State<Arc<AppState>>,
    CompanyId(raw_id): CompanyId,
    body: Fields,
) -> Result<Response, ApiError> {
    let mut v = Validator::new();
    let id = v.required(Location::Params, "COMPANY_ID", Some(raw_id.as_str()));
    let name = v.required_value(Location::Body, "COMPANY_NAME", body.get("COMPANY_NAME"));
    let city = v.required_value(Location::Body, "COMPANY_CITY", body.get("COMPANY_CITY"));
    v.finish()?;

    let outcome = state
        .directory
        .replace_company(&id, &name, &city)
        .await
        .map_err(ApiError::WriteFailed)?;
    applied(outcome)
}

/// DELETE /company/{COMPANY_ID}
async fn delete_company(
    State(state): State<Arc<AppState>>,
    CompanyId(raw_id): CompanyId,
) -> Result<Response, ApiError> {
    let mut v = Validator::new();
    let id = v.required(Location::Params, "COMPANY_ID", Some(raw_id.as_str()));
    v.finish()?;

    let outcome = state
        .directory
        .delete_company(&id)
        .await
        .map_err(ApiError::WriteFailed)?;
    applied(outcome)
}

/// Company routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/company", post(create_company))
        .route(
            "/company/{COMPANY_ID}",
            patch(patch_company).put(put_company).delete(delete_company),
        )
}
