//! GET /say - relay a keyword to the remote cloud function

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::extractors::QueryMap;
use crate::http::server::AppState;
use crate::models::{Location, Validator};

/// Remote response, relayed verbatim
#[derive(Debug, Serialize)]
pub struct SayMessage {
    pub message: Value,
}

/// GET /say?keyword=K
async fn say(
    State(state): State<Arc<AppState>>,
    QueryMap(params): QueryMap,
) -> Result<Json<SayMessage>, ApiError> {
    let mut v = Validator::new();
    let keyword = v.present(
        Location::Query,
        "keyword",
        params.get("keyword").map(String::as_str),
    );
    v.finish()?;

    let message = state.say.say(&keyword).await?;
    Ok(Json(SayMessage { message }))
}

/// Proxy routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/say", get(say))
}
