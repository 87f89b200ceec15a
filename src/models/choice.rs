use sqlx::FromRow;
use uuid::Uuid;

/// One selectable answer. Deliberately not serializable: the correctness
/// flag must never reach a response body, so only presentation DTOs (which
/// carry id and text alone) cross the wire.
#[derive(Debug, Clone, FromRow)]
pub struct Choice {
    pub id: Uuid,
    pub question_id: Uuid,
    pub text: String,
    pub is_correct: bool,
}
