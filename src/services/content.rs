use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::choice::Choice;
use crate::models::dataset::Dataset;
use crate::models::passage::Passage;
use crate::models::question::{Question, QuestionWithChoices};
use crate::models::quiz::{Category, Quiz};

const QUIZ_COLUMNS: &str =
    "id, title, category, description, time_limit, is_random_practice, created_at";

const QUESTION_COLUMNS: &str =
    "id, quiz_id, passage_id, dataset_id, text, explanation, question_type";

/// A passage and the questions it owns, with choices attached.
#[derive(Debug, Clone)]
pub struct PassageContent {
    pub passage: Passage,
    pub questions: Vec<QuestionWithChoices>,
}

#[derive(Debug, Clone)]
pub struct DatasetContent {
    pub dataset: Dataset,
    pub questions: Vec<QuestionWithChoices>,
}

/// One consistent snapshot of everything a quiz can deliver.
#[derive(Debug, Clone)]
pub struct QuizContent {
    pub quiz: Quiz,
    pub standalone: Vec<QuestionWithChoices>,
    pub passages: Vec<PassageContent>,
    pub datasets: Vec<DatasetContent>,
}

/// Which content a grading request may reach. Visible ids outside the scope
/// are simply not returned, so they drop out of the graded total.
#[derive(Debug, Clone, Copy)]
pub enum GradingScope {
    Quiz(Uuid),
    Category(Category),
}

/// Per-category listing row for the grouped overview screen.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CategoryGroup {
    #[serde(rename = "type")]
    pub label: &'static str,
    pub code: Category,
    pub count: usize,
    pub quizzes: Vec<Quiz>,
}

/// Read-only access to quizzes, passages, datasets, questions and choices.
#[derive(Clone)]
pub struct ContentService {
    pool: PgPool,
}

impl ContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn quiz_by_id(&self, quiz_id: Uuid) -> Result<Quiz> {
        let quiz = sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = $1"
        ))
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;
        Ok(quiz)
    }

    pub async fn list_quizzes(
        &self,
        category: Option<Category>,
        timed_only: bool,
    ) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(&format!(
            r#"
            SELECT {QUIZ_COLUMNS} FROM quizzes
            WHERE NOT is_random_practice
              AND ($1::quiz_category IS NULL OR category = $1)
              AND (NOT $2 OR time_limit > 0)
            ORDER BY created_at
            "#
        ))
        .bind(category)
        .bind(timed_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(quizzes)
    }

    /// All authored quizzes bucketed by category, every category present
    /// even when empty.
    pub async fn grouped_by_category(&self) -> Result<Vec<CategoryGroup>> {
        let all = self.list_quizzes(None, false).await?;
        let mut buckets: HashMap<Category, Vec<Quiz>> = HashMap::new();
        for quiz in all {
            buckets.entry(quiz.category).or_default().push(quiz);
        }
        Ok(Category::ALL
            .iter()
            .map(|cat| {
                let quizzes = buckets.remove(cat).unwrap_or_default();
                CategoryGroup {
                    label: cat.label(),
                    code: *cat,
                    count: quizzes.len(),
                    quizzes,
                }
            })
            .collect())
    }

    /// Full content snapshot for one quiz: standalone questions plus
    /// passages and datasets with their nested questions, choices attached.
    pub async fn quiz_content(&self, quiz: &Quiz) -> Result<QuizContent> {
        let standalone_rows = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE quiz_id = $1"
        ))
        .bind(quiz.id)
        .fetch_all(&self.pool)
        .await?;

        let passages = sqlx::query_as::<_, Passage>(
            "SELECT id, quiz_id, title, body FROM passages WHERE quiz_id = $1 ORDER BY title",
        )
        .bind(quiz.id)
        .fetch_all(&self.pool)
        .await?;

        let datasets = sqlx::query_as::<_, Dataset>(
            "SELECT id, quiz_id, title, description, image FROM datasets WHERE quiz_id = $1 ORDER BY title",
        )
        .bind(quiz.id)
        .fetch_all(&self.pool)
        .await?;

        let passage_ids: Vec<Uuid> = passages.iter().map(|p| p.id).collect();
        let passage_rows = if passage_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, Question>(&format!(
                "SELECT {QUESTION_COLUMNS} FROM questions WHERE passage_id = ANY($1)"
            ))
            .bind(&passage_ids)
            .fetch_all(&self.pool)
            .await?
        };

        let dataset_ids: Vec<Uuid> = datasets.iter().map(|d| d.id).collect();
        let dataset_rows = if dataset_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, Question>(&format!(
                "SELECT {QUESTION_COLUMNS} FROM questions WHERE dataset_id = ANY($1)"
            ))
            .bind(&dataset_ids)
            .fetch_all(&self.pool)
            .await?
        };

        let mut all_ids: Vec<Uuid> = Vec::new();
        all_ids.extend(standalone_rows.iter().map(|q| q.id));
        all_ids.extend(passage_rows.iter().map(|q| q.id));
        all_ids.extend(dataset_rows.iter().map(|q| q.id));
        let mut choices = self.choices_by_question(&all_ids).await?;

        let mut attach = |rows: Vec<Question>| -> Vec<QuestionWithChoices> {
            rows.into_iter()
                .filter(|q| q.owner.is_some())
                .map(|question| {
                    let choices = choices.remove(&question.id).unwrap_or_default();
                    QuestionWithChoices { question, choices }
                })
                .collect()
        };

        let standalone = attach(standalone_rows);
        let mut by_passage: HashMap<Uuid, Vec<QuestionWithChoices>> = HashMap::new();
        for qwc in attach(passage_rows) {
            if let Some(crate::models::question::QuestionOwner::Passage(pid)) = qwc.question.owner {
                by_passage.entry(pid).or_default().push(qwc);
            }
        }
        let mut by_dataset: HashMap<Uuid, Vec<QuestionWithChoices>> = HashMap::new();
        for qwc in attach(dataset_rows) {
            if let Some(crate::models::question::QuestionOwner::Dataset(did)) = qwc.question.owner {
                by_dataset.entry(did).or_default().push(qwc);
            }
        }

        Ok(QuizContent {
            quiz: quiz.clone(),
            standalone,
            passages: passages
                .into_iter()
                .map(|passage| {
                    let questions = by_passage.remove(&passage.id).unwrap_or_default();
                    PassageContent { passage, questions }
                })
                .collect(),
            datasets: datasets
                .into_iter()
                .map(|dataset| {
                    let questions = by_dataset.remove(&dataset.id).unwrap_or_default();
                    DatasetContent { dataset, questions }
                })
                .collect(),
        })
    }

    /// Snapshots of every authored quiz in a category, for cross-quiz
    /// random practice. The synthetic random-practice placeholder is never
    /// part of the pool.
    pub async fn category_pool(&self, category: Category) -> Result<Vec<QuizContent>> {
        let quizzes = self.list_quizzes(Some(category), false).await?;
        let mut pool = Vec::with_capacity(quizzes.len());
        for quiz in &quizzes {
            pool.push(self.quiz_content(quiz).await?);
        }
        Ok(pool)
    }

    /// Authoritative questions-with-choices for a visible-id list, scoped so
    /// that ids from outside the submitted quiz or category cannot be graded.
    pub async fn questions_for_grading(
        &self,
        visible_ids: &[Uuid],
        scope: GradingScope,
    ) -> Result<HashMap<Uuid, QuestionWithChoices>> {
        if visible_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<Uuid> = visible_ids.to_vec();
        let rows = match scope {
            GradingScope::Quiz(quiz_id) => {
                sqlx::query_as::<_, Question>(
                    r#"
                    SELECT q.id, q.quiz_id, q.passage_id, q.dataset_id,
                           q.text, q.explanation, q.question_type
                    FROM questions q
                    LEFT JOIN passages p ON q.passage_id = p.id
                    LEFT JOIN datasets d ON q.dataset_id = d.id
                    WHERE q.id = ANY($1)
                      AND COALESCE(q.quiz_id, p.quiz_id, d.quiz_id) = $2
                    "#,
                )
                .bind(&ids)
                .bind(quiz_id)
                .fetch_all(&self.pool)
                .await?
            }
            GradingScope::Category(category) => {
                sqlx::query_as::<_, Question>(
                    r#"
                    SELECT q.id, q.quiz_id, q.passage_id, q.dataset_id,
                           q.text, q.explanation, q.question_type
                    FROM questions q
                    LEFT JOIN passages p ON q.passage_id = p.id
                    LEFT JOIN datasets d ON q.dataset_id = d.id
                    JOIN quizzes z ON z.id = COALESCE(q.quiz_id, p.quiz_id, d.quiz_id)
                    WHERE q.id = ANY($1)
                      AND z.category = $2
                      AND NOT z.is_random_practice
                    "#,
                )
                .bind(&ids)
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let question_ids: Vec<Uuid> = rows.iter().map(|q| q.id).collect();
        let mut choices = self.choices_by_question(&question_ids).await?;

        Ok(rows
            .into_iter()
            .filter(|q| q.owner.is_some())
            .map(|question| {
                let choices = choices.remove(&question.id).unwrap_or_default();
                (question.id, QuestionWithChoices { question, choices })
            })
            .collect())
    }

    async fn choices_by_question(
        &self,
        question_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Choice>>> {
        if question_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<Uuid> = question_ids.to_vec();
        let rows = sqlx::query_as::<_, Choice>(
            "SELECT id, question_id, text, is_correct FROM choices WHERE question_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Choice>> = HashMap::new();
        for choice in rows {
            grouped.entry(choice.question_id).or_default().push(choice);
        }
        Ok(grouped)
    }
}
