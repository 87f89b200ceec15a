use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Content domain of a quiz. Wire format uses the short codes
/// (`NUM`, `VER`, ...) the clients were built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "quiz_category")]
pub enum Category {
    #[serde(rename = "NUM")]
    #[sqlx(rename = "NUM")]
    Numerical,
    #[serde(rename = "VER")]
    #[sqlx(rename = "VER")]
    Verbal,
    #[serde(rename = "ANA")]
    #[sqlx(rename = "ANA")]
    Analytical,
    #[serde(rename = "CLE")]
    #[sqlx(rename = "CLE")]
    Clerical,
    #[serde(rename = "GEN")]
    #[sqlx(rename = "GEN")]
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Numerical,
        Category::Verbal,
        Category::Analytical,
        Category::Clerical,
        Category::General,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "NUM" => Some(Category::Numerical),
            "VER" => Some(Category::Verbal),
            "ANA" => Some(Category::Analytical),
            "CLE" => Some(Category::Clerical),
            "GEN" => Some(Category::General),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Category::Numerical => "NUM",
            Category::Verbal => "VER",
            Category::Analytical => "ANA",
            Category::Clerical => "CLE",
            Category::General => "GEN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Numerical => "Numerical Ability",
            Category::Verbal => "Verbal Ability",
            Category::Analytical => "Analytical Ability",
            Category::Clerical => "Clerical Ability",
            Category::General => "General Information",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "quiz_type")]
    pub category: Category,
    pub description: String,
    /// Minutes; 0 means untimed.
    pub time_limit: i32,
    pub is_random_practice: bool,
    pub created_at: DateTime<Utc>,
}
