use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::attempt_dto::{SubmitAttemptRequest, SubmitRandomRequest};
use crate::error::Result;
use crate::middleware::auth::OptionalRequester;
use crate::AppState;

/// Grade a submission against an authored quiz. Anonymous submissions are
/// graded but not recorded.
#[axum::debug_handler]
pub async fn submit_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    OptionalRequester(requester): OptionalRequester,
    Json(req): Json<SubmitAttemptRequest>,
) -> Result<Response> {
    let response = state.attempt_service.submit_quiz(id, req, requester).await?;
    Ok(Json(response).into_response())
}

/// Grade a cross-quiz random-practice submission.
#[axum::debug_handler]
pub async fn submit_random(
    State(state): State<AppState>,
    OptionalRequester(requester): OptionalRequester,
    Json(req): Json<SubmitRandomRequest>,
) -> Result<Response> {
    req.validate()?;
    let response = state.attempt_service.submit_random(req, requester).await?;
    Ok(Json(response).into_response())
}
