use sqlx::FromRow;
use uuid::Uuid;

/// Reading-comprehension passage; owns its questions. Verbal quizzes only.
#[derive(Debug, Clone, FromRow)]
pub struct Passage {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub title: String,
    pub body: String,
}
