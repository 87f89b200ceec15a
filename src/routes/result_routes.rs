use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::AppState;

fn requester_id(claims: &Claims) -> Result<uuid::Uuid> {
    claims
        .requester_id()
        .ok_or_else(|| Error::Unauthorized("Token subject is not a valid user id".to_string()))
}

/// The requester's outcome history, newest first.
#[axum::debug_handler]
pub async fn my_results(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response> {
    let user_id = requester_id(&claims)?;
    let outcomes = state.result_service.list_for(user_id).await?;
    Ok(Json(outcomes).into_response())
}

/// Per-category average/best/attempt-count aggregates for the requester.
#[axum::debug_handler]
pub async fn my_summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response> {
    let user_id = requester_id(&claims)?;
    let summary = state.result_service.summarize(user_id).await?;
    Ok(Json(json!({ "summary": summary })).into_response())
}
