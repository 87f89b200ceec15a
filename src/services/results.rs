use std::collections::HashMap;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::outcome::Outcome;
use crate::models::quiz::{Category, Quiz};
use crate::services::grader::{round2, GradedAttempt};

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    #[serde(rename = "type")]
    pub category: Category,
    pub label: &'static str,
    pub average_score: f64,
    pub best_score: f64,
    pub attempts: i64,
}

/// Append-only outcome history. One record per graded authenticated
/// submission; never updated, never deleted.
#[derive(Clone)]
pub struct ResultService {
    pool: PgPool,
}

impl ResultService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn record(
        &self,
        user_id: Option<Uuid>,
        quiz_id: Option<Uuid>,
        category: Category,
        graded: &GradedAttempt,
    ) -> Result<Uuid> {
        let score = Decimal::from_f64(graded.score)
            .unwrap_or_default()
            .round_dp(2);
        let outcome_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO outcomes (user_id, quiz_id, category, score, correct, total)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(category)
        .bind(score)
        .bind(graded.correct)
        .bind(graded.total)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            outcome_id = %outcome_id,
            category = %category,
            score = graded.score,
            "recorded attempt outcome"
        );
        Ok(outcome_id)
    }

    pub async fn list_for(&self, user_id: Uuid) -> Result<Vec<Outcome>> {
        let outcomes = sqlx::query_as::<_, Outcome>(
            r#"
            SELECT id, user_id, quiz_id, category, score, correct, total, submitted_at
            FROM outcomes
            WHERE user_id = $1
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(outcomes)
    }

    /// Per-category average/best/count, recomputed from the full history on
    /// every call rather than kept as running totals.
    pub async fn summarize(&self, user_id: Uuid) -> Result<Vec<CategorySummary>> {
        let outcomes = self.list_for(user_id).await?;
        Ok(summarize_outcomes(&outcomes))
    }

    /// The placeholder quiz random-practice outcomes hang off, created on
    /// first use per category so aggregate-by-category queries stay uniform.
    pub async fn ensure_random_practice_quiz(&self, category: Category) -> Result<Quiz> {
        let select = r#"
            SELECT id, title, category, description, time_limit, is_random_practice, created_at
            FROM quizzes
            WHERE category = $1 AND is_random_practice
        "#;
        if let Some(quiz) = sqlx::query_as::<_, Quiz>(select)
            .bind(category)
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(quiz);
        }

        sqlx::query(
            r#"
            INSERT INTO quizzes (title, category, description, time_limit, is_random_practice)
            VALUES ($1, $2, $3, 0, TRUE)
            ON CONFLICT (category) WHERE is_random_practice DO NOTHING
            "#,
        )
        .bind(format!("Random Quiz ({})", category.label()))
        .bind(category)
        .bind("Auto-generated bucket for cross-quiz random practice results.")
        .execute(&self.pool)
        .await?;

        sqlx::query_as::<_, Quiz>(select)
            .bind(category)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                Error::Internal("random practice quiz missing after insert".to_string())
            })
    }
}

/// Fold the outcome history into per-category aggregates. Categories with no
/// attempts are omitted.
pub fn summarize_outcomes(outcomes: &[Outcome]) -> Vec<CategorySummary> {
    let mut grouped: HashMap<Category, Vec<f64>> = HashMap::new();
    for outcome in outcomes {
        grouped
            .entry(outcome.category)
            .or_default()
            .push(outcome.score.to_f64().unwrap_or(0.0));
    }

    Category::ALL
        .iter()
        .filter_map(|category| {
            let scores = grouped.get(category)?;
            let attempts = scores.len() as i64;
            let sum: f64 = scores.iter().sum();
            let best = scores.iter().cloned().fold(0.0_f64, f64::max);
            Some(CategorySummary {
                category: *category,
                label: category.label(),
                average_score: round2(sum / attempts as f64),
                best_score: round2(best),
                attempts,
            })
        })
        .collect()
}
