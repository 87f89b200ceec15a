use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::quiz::Category;

/// Append-only record of one graded attempt. Never updated or deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Outcome {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub quiz_id: Option<Uuid>,
    pub category: Category,
    pub score: Decimal,
    pub correct: i32,
    pub total: i32,
    pub submitted_at: DateTime<Utc>,
}
