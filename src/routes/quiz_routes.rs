use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::quiz::Category;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct QuizListQuery {
    #[serde(rename = "type")]
    pub quiz_type: Option<String>,
    pub timed: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RandomQuizQuery {
    #[serde(rename = "type")]
    pub quiz_type: String,
}

/// Quiz metadata listing, optionally filtered by category and timed-only.
#[axum::debug_handler]
pub async fn list_quizzes(
    State(state): State<AppState>,
    Query(query): Query<QuizListQuery>,
) -> Result<Response> {
    let category = match query.quiz_type.as_deref() {
        Some(code) => {
            Some(Category::from_code(code).ok_or_else(|| Error::InvalidCategory(code.to_string()))?)
        }
        None => None,
    };
    let timed_only = query.timed.as_deref() == Some("true");

    let quizzes = state.content_service.list_quizzes(category, timed_only).await?;
    Ok(Json(quizzes).into_response())
}

/// Quizzes bucketed by category with counts, for the overview screen.
#[axum::debug_handler]
pub async fn grouped_quizzes(State(state): State<AppState>) -> Result<Response> {
    let groups = state.content_service.grouped_by_category().await?;

    let summary: Vec<_> = groups
        .iter()
        .map(|g| json!({ "type": g.label, "code": g.code, "count": g.count }))
        .collect();
    let grouped: serde_json::Map<String, serde_json::Value> = groups
        .iter()
        .map(|g| (g.label.to_string(), json!(g.quizzes)))
        .collect();

    Ok(Json(json!({ "summary": summary, "groups": grouped })).into_response())
}

/// One authored-quiz delivery: a freshly sampled Presented Set.
#[axum::debug_handler]
pub async fn get_quiz(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response> {
    let presented = state.attempt_service.present_quiz(id).await?;
    Ok(Json(presented).into_response())
}

/// Cross-quiz random practice for a category.
#[axum::debug_handler]
pub async fn random_quiz(
    State(state): State<AppState>,
    Query(query): Query<RandomQuizQuery>,
) -> Result<Response> {
    let category = Category::from_code(&query.quiz_type)
        .ok_or_else(|| Error::InvalidCategory(query.quiz_type.clone()))?;
    let presented = state.attempt_service.present_random(category).await?;
    Ok(Json(presented).into_response())
}
