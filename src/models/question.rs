use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::models::choice::Choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Identification,
}

impl QuestionType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "true_false" => QuestionType::TrueFalse,
            "identification" => QuestionType::Identification,
            _ => QuestionType::MultipleChoice,
        }
    }
}

/// Who a question belongs to. Exactly one parent; rows with no parent at all
/// are orphans (`None`) and are excluded from every content read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOwner {
    Standalone(Uuid),
    Passage(Uuid),
    Dataset(Uuid),
}

impl QuestionOwner {
    pub fn from_parents(
        quiz_id: Option<Uuid>,
        passage_id: Option<Uuid>,
        dataset_id: Option<Uuid>,
    ) -> Option<Self> {
        match (passage_id, dataset_id, quiz_id) {
            (Some(p), _, _) => Some(QuestionOwner::Passage(p)),
            (None, Some(d), _) => Some(QuestionOwner::Dataset(d)),
            (None, None, Some(q)) => Some(QuestionOwner::Standalone(q)),
            (None, None, None) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    /// Shown only after grading; never part of the presented payload.
    pub explanation: String,
    pub question_type: QuestionType,
    pub owner: Option<QuestionOwner>,
}

impl<'r> FromRow<'r, PgRow> for Question {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let quiz_id: Option<Uuid> = row.try_get("quiz_id")?;
        let passage_id: Option<Uuid> = row.try_get("passage_id")?;
        let dataset_id: Option<Uuid> = row.try_get("dataset_id")?;
        let type_tag: String = row.try_get("question_type")?;
        Ok(Question {
            id: row.try_get("id")?,
            text: row.try_get("text")?,
            explanation: row.try_get("explanation")?,
            question_type: QuestionType::from_tag(&type_tag),
            owner: QuestionOwner::from_parents(quiz_id, passage_id, dataset_id),
        })
    }
}

/// A question together with its authoritative choices, as one consistent
/// snapshot for sampling or grading.
#[derive(Debug, Clone)]
pub struct QuestionWithChoices {
    pub question: Question,
    pub choices: Vec<Choice>,
}

impl QuestionWithChoices {
    pub fn id(&self) -> Uuid {
        self.question.id
    }
}
