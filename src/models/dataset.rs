use sqlx::FromRow;
use uuid::Uuid;

/// Data-interpretation dataset; owns its questions. Numerical quizzes only.
/// The image field is an opaque reference resolved by the presentation layer.
#[derive(Debug, Clone, FromRow)]
pub struct Dataset {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}
