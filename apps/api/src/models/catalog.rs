use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    /// Stored lowercased; uniqueness is case-insensitive.
    pub name: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Career {
    pub id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub avg_salary: Option<f64>,
    pub growth_rate: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resource {
    pub id: Uuid,
    pub career_id: Option<Uuid>,
    pub title: String,
    pub url: Option<String>,
    pub resource_type: Option<String>,
    pub provider: Option<String>,
    pub tags: Option<Value>,
}
