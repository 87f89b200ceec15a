use std::sync::Arc;

use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::dto::attempt_dto::{SubmitAttemptRequest, SubmitAttemptResponse, SubmitRandomRequest};
use crate::dto::quiz_dto::{PresentedQuizResponse, RandomQuizResponse};
use crate::error::{Error, Result};
use crate::models::quiz::Category;
use crate::services::attempt_store::{AttemptScope, AttemptStore};
use crate::services::content::{ContentService, GradingScope};
use crate::services::grader;
use crate::services::results::ResultService;
use crate::services::sampler;

/// Glue between content reads, sampling, grading and outcome recording.
/// Each call runs to completion within one request; the only state shared
/// across requests is the attempt-token store.
#[derive(Clone)]
pub struct AttemptService {
    content: ContentService,
    results: ResultService,
    store: Arc<AttemptStore>,
}

impl AttemptService {
    pub fn new(content: ContentService, results: ResultService, store: Arc<AttemptStore>) -> Self {
        Self {
            content,
            results,
            store,
        }
    }

    /// Deliver one authored quiz: sample a Presented Set, stash its id list
    /// under a fresh attempt token, return both to the caller.
    pub async fn present_quiz(&self, quiz_id: Uuid) -> Result<PresentedQuizResponse> {
        let quiz = self.content.quiz_by_id(quiz_id).await?;
        if quiz.is_random_practice {
            return Err(Error::NotFound("Quiz not found".to_string()));
        }
        let content = self.content.quiz_content(&quiz).await?;

        let set = {
            let mut rng = rand::thread_rng();
            sampler::sample_quiz(&content, &mut rng)
        };
        if set.is_empty() {
            tracing::warn!(quiz_id = %quiz.id, "quiz has no eligible questions");
        }

        let token = self
            .store
            .issue(AttemptScope::Quiz(quiz.id), set.visible_ids());
        Ok(PresentedQuizResponse::from_parts(&quiz, &set, token))
    }

    /// Deliver a cross-quiz random-practice set for a category.
    pub async fn present_random(&self, category: Category) -> Result<RandomQuizResponse> {
        let pool = self.content.category_pool(category).await?;

        let set = {
            let mut rng = rand::thread_rng();
            sampler::sample_category_pool(&pool, category, &mut rng)
        };
        if set.is_empty() {
            tracing::warn!(category = %category, "category has no eligible questions");
        }

        let token = self
            .store
            .issue(AttemptScope::Category(category), set.visible_ids());
        Ok(RandomQuizResponse::from_parts(category, &set, token))
    }

    /// Grade a submission against an authored quiz and record the outcome
    /// for signed-in requesters.
    pub async fn submit_quiz(
        &self,
        quiz_id: Uuid,
        req: SubmitAttemptRequest,
        requester: Option<Uuid>,
    ) -> Result<SubmitAttemptResponse> {
        let quiz = self.content.quiz_by_id(quiz_id).await?;
        if req.answers.is_empty() {
            return Err(Error::InvalidSubmission("No answers provided".to_string()));
        }

        let answers = grader::collect_answers(&req.answers);
        let visible = self.resolve_visible_ids(
            req.attempt_token.as_deref(),
            AttemptScope::Quiz(quiz.id),
            &req.visible_questions,
            &req.answers,
        );
        let questions = self
            .content
            .questions_for_grading(&visible, GradingScope::Quiz(quiz.id))
            .await?;
        let graded = grader::grade(&visible, &answers, &questions);

        let recorded = match requester {
            Some(user_id) => {
                self.results
                    .record(Some(user_id), Some(quiz.id), quiz.category, &graded)
                    .await?;
                true
            }
            None => false,
        };

        Ok(SubmitAttemptResponse {
            quiz: quiz.title,
            score: graded.score,
            correct: graded.correct,
            total: graded.total,
            details: graded.details,
            recorded,
        })
    }

    /// Grade a cross-quiz random-practice submission. Recorded outcomes
    /// hang off the per-category synthetic placeholder quiz.
    pub async fn submit_random(
        &self,
        req: SubmitRandomRequest,
        requester: Option<Uuid>,
    ) -> Result<SubmitAttemptResponse> {
        let category = Category::from_code(&req.quiz_type)
            .ok_or_else(|| Error::InvalidCategory(req.quiz_type.clone()))?;
        if req.answers.is_empty() {
            return Err(Error::InvalidSubmission("No answers provided".to_string()));
        }

        let answers = grader::collect_answers(&req.answers);
        let visible = self.resolve_visible_ids(
            req.attempt_token.as_deref(),
            AttemptScope::Category(category),
            &req.visible_questions,
            &req.answers,
        );
        let questions = self
            .content
            .questions_for_grading(&visible, GradingScope::Category(category))
            .await?;
        let graded = grader::grade(&visible, &answers, &questions);

        let (quiz_title, recorded) = match requester {
            Some(user_id) => {
                let placeholder = self.results.ensure_random_practice_quiz(category).await?;
                self.results
                    .record(Some(user_id), Some(placeholder.id), category, &graded)
                    .await?;
                (placeholder.title, true)
            }
            None => (format!("Random Quiz ({})", category.label()), false),
        };

        Ok(SubmitAttemptResponse {
            quiz: quiz_title,
            score: graded.score,
            correct: graded.correct,
            total: graded.total,
            details: graded.details,
            recorded,
        })
    }

    /// The authoritative visible-id list for grading, in preference order:
    /// the server-stored set behind a live attempt token, then the
    /// client-declared list, then the answered ids themselves.
    fn resolve_visible_ids(
        &self,
        attempt_token: Option<&str>,
        scope: AttemptScope,
        declared: &[JsonValue],
        answers: &[JsonValue],
    ) -> Vec<Uuid> {
        if let Some(token) = attempt_token {
            if let Some(ids) = self.store.take(token, scope) {
                return ids;
            }
            tracing::debug!("attempt token expired or unknown; using client-declared ids");
        }

        let declared_ids = grader::parse_id_list(declared);
        if !declared_ids.is_empty() {
            return declared_ids;
        }
        grader::answered_ids(answers)
    }
}
