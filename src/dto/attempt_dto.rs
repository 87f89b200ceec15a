use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::services::grader::AnswerDetail;

/// Submission against an authored quiz. Answer entries and the visible-id
/// list arrive as raw JSON so individually malformed entries can be dropped
/// instead of failing the whole body.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAttemptRequest {
    #[serde(default)]
    pub attempt_token: Option<String>,
    #[serde(default)]
    pub visible_questions: Vec<JsonValue>,
    #[serde(default)]
    pub answers: Vec<JsonValue>,
}

/// Submission in cross-quiz random-practice mode.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitRandomRequest {
    #[validate(length(min = 1, message = "quiz_type is required"))]
    pub quiz_type: String,
    #[serde(default)]
    pub attempt_token: Option<String>,
    #[serde(default)]
    pub visible_questions: Vec<JsonValue>,
    #[serde(default)]
    pub answers: Vec<JsonValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAttemptResponse {
    pub quiz: String,
    pub score: f64,
    pub correct: i32,
    pub total: i32,
    pub details: Vec<AnswerDetail>,
    pub recorded: bool,
}
